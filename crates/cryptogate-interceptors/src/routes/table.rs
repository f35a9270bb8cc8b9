use super::model::{MatchCond, RouteCryptoMetadata, RouteCryptoSpec};

/// Immutable route → crypto metadata mapping, built once at startup.
#[derive(Clone, Debug, Default)]
pub struct RouteCryptoTable {
    rules: Vec<RouteCryptoSpec>,
}

impl RouteCryptoTable {
    pub fn new(rules: Vec<RouteCryptoSpec>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[RouteCryptoSpec] {
        &self.rules
    }

    pub fn match_http(&self, method: &str, path: &str) -> Option<&RouteCryptoMetadata> {
        self.rules
            .iter()
            .find(|rule| match &rule.when {
                MatchCond::Http {
                    method: expected,
                    path_glob,
                } => method_matches(expected, method) && path_matches(path_glob, path),
            })
            .map(|rule| &rule.crypto)
    }

    /// Looks up by the matched route template first, then by the concrete path.
    pub fn lookup(
        &self,
        method: &str,
        route: Option<&str>,
        path: &str,
    ) -> Option<&RouteCryptoMetadata> {
        route
            .and_then(|template| self.match_http(method, template))
            .or_else(|| self.match_http(method, path))
    }
}

fn method_matches(expected: &str, method: &str) -> bool {
    expected == "*" || expected.eq_ignore_ascii_case(method)
}

fn path_matches(glob: &str, path: &str) -> bool {
    if let Some(stripped) = glob.strip_suffix('*') {
        path.starts_with(stripped)
    } else {
        glob == path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptogate_cipher::{CryptoDirection, CryptoMethod};

    fn spec(method: &str, glob: &str, crypto: CryptoMethod) -> RouteCryptoSpec {
        RouteCryptoSpec {
            when: MatchCond::Http {
                method: method.into(),
                path_glob: glob.into(),
            },
            crypto: RouteCryptoMetadata::new(crypto, CryptoDirection::Both),
        }
    }

    #[test]
    fn first_matching_rule_wins() {
        let table = RouteCryptoTable::new(vec![
            spec("POST", "/v1/secure/rsa", CryptoMethod::Rsa),
            spec("*", "/v1/secure/*", CryptoMethod::Aes),
        ]);

        let hit = table.match_http("post", "/v1/secure/rsa").unwrap();
        assert_eq!(hit.method, CryptoMethod::Rsa);
        let hit = table.match_http("GET", "/v1/secure/rsa").unwrap();
        assert_eq!(hit.method, CryptoMethod::Aes);
        assert!(table.match_http("GET", "/v1/open").is_none());
    }

    #[test]
    fn lookup_prefers_route_template() {
        let table = RouteCryptoTable::new(vec![spec("GET", "/v1/users/:id", CryptoMethod::Rsa)]);
        assert!(table
            .lookup("GET", Some("/v1/users/:id"), "/v1/users/42")
            .is_some());
        assert!(table.lookup("GET", None, "/v1/users/42").is_none());
    }

    #[test]
    fn specs_deserialize_from_yaml_shaped_json() {
        let raw = serde_json::json!({
            "when": {"http": {"method": "POST", "path_glob": "/v1/pay"}},
            "crypto": {"method": "RSA", "options": {"rsa": {"public_key": "pem"}}}
        });
        let spec: RouteCryptoSpec = serde_json::from_value(raw).unwrap();
        assert_eq!(spec.crypto.direction, CryptoDirection::Both);
        assert_eq!(
            spec.crypto.options.rsa.unwrap().public_key.as_deref(),
            Some("pem")
        );
    }
}
