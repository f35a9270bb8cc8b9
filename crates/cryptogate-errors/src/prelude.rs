pub use crate::{
    class::{ErrorKind, RetryClass, Severity},
    code::{codes, spec_of, CodeSpec, ErrorCode, REGISTRY},
    model::{ErrorBuilder, ErrorObj},
    render::{AuditErrorView, PublicErrorView},
};
