use k8s_openapi::api::core::v1::Secret;

/// Picks the first secret, in the given order, whose name contains `prefix`.
pub fn find_token_secret<'a>(secrets: &'a [Secret], prefix: &str) -> Option<&'a Secret> {
    secrets.iter().find(|secret| name_contains(secret, prefix))
}

pub fn count_token_secrets(secrets: &[Secret], prefix: &str) -> usize {
    secrets
        .iter()
        .filter(|secret| name_contains(secret, prefix))
        .count()
}

/// Reads `key` from the secret data as raw bytes, an absent key yields an empty token.
pub fn read_token(secret: &Secret, key: &str) -> Vec<u8> {
    secret
        .data
        .as_ref()
        .and_then(|data| data.get(key))
        .map(|token| token.0.clone())
        .unwrap_or_default()
}

fn name_contains(secret: &Secret, prefix: &str) -> bool {
    secret
        .metadata
        .name
        .as_deref()
        .map_or(false, |name| name.contains(prefix))
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeMap;

    use k8s_openapi::{api::core::v1::Secret, ByteString};
    use kube::core::ObjectMeta;

    use super::{count_token_secrets, find_token_secret, read_token};

    pub fn secret<V: AsRef<[u8]>>(name: &str, data: &[(&str, V)]) -> Secret {
        let data = data
            .iter()
            .map(|(k, v)| ((*k).to_owned(), ByteString(v.as_ref().to_vec())))
            .collect::<BTreeMap<_, _>>();

        Secret {
            metadata: ObjectMeta {
                name: Some(name.to_owned()),
                ..Default::default()
            },
            data: Some(data),
            ..Default::default()
        }
    }

    #[test]
    fn first_matching_secret_wins() {
        let secrets = vec![
            secret("builder-token-x1", &[("token", "builder")]),
            secret("prometheus-k8s-token-b2", &[("token", "first")]),
            secret("prometheus-k8s-token-a1", &[("token", "second")]),
        ];

        let selected = find_token_secret(&secrets, "prometheus-k8s-token").unwrap();

        assert_eq!(read_token(selected, "token"), b"first");
        assert_eq!(count_token_secrets(&secrets, "prometheus-k8s-token"), 2);
    }

    #[test]
    fn prefix_matches_anywhere_in_the_name() {
        let secrets = vec![secret("ns-prometheus-k8s-token-zz", &[("token", "abc")])];

        assert!(find_token_secret(&secrets, "prometheus-k8s-token").is_some());
    }

    #[test]
    fn no_matching_secret() {
        let secrets = vec![
            secret("default-token-abcde", &[("token", "nope")]),
            Secret::default(),
        ];

        assert!(find_token_secret(&secrets, "prometheus-k8s-token").is_none());
        assert_eq!(count_token_secrets(&secrets, "prometheus-k8s-token"), 0);
    }

    #[test]
    fn missing_token_key_reads_as_empty() {
        let secret = secret("prometheus-k8s-token-a1", &[("ca.crt", "cert")]);

        assert_eq!(read_token(&secret, "token"), b"");
        assert_eq!(read_token(&Secret::default(), "token"), b"");
    }

    #[test]
    fn token_bytes_are_kept_verbatim() {
        let secret = secret("prometheus-k8s-token-a1", &[("token", [b'a', 0xff, b'b'])]);

        assert_eq!(read_token(&secret, "token"), vec![b'a', 0xff, b'b']);
    }
}
