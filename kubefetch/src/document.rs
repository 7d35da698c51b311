use serde_yaml::{Mapping, Value as YamlValue};

use crate::FetchError;

/// A kubeconfig held as a raw YAML tree.
///
/// Only `clusters[i].cluster.server` is ever touched. Everything else,
/// including fields this crate knows nothing about, is written back as read.
#[derive(Debug, Clone, PartialEq)]
pub struct KubeConfig {
    doc: YamlValue,
}

impl KubeConfig {
    pub fn parse(text: &str) -> Result<KubeConfig, FetchError> {
        let doc = serde_yaml::from_str(text).map_err(FetchError::Parse)?;
        Ok(KubeConfig { doc })
    }

    pub fn server(&self, index: usize) -> Option<&str> {
        self.doc
            .get("clusters")?
            .get(index)?
            .get("cluster")?
            .get("server")?
            .as_str()
    }

    fn cluster_spec_mut(&mut self, index: usize) -> Result<&mut Mapping, FetchError> {
        let entry = self
            .doc
            .get_mut("clusters")
            .and_then(|clusters| clusters.get_mut(index))
            .ok_or(FetchError::MissingCluster { index })?;

        entry
            .get_mut("cluster")
            .and_then(YamlValue::as_mapping_mut)
            .ok_or(FetchError::MalformedCluster { index })
    }

    /// Overwrites the server of the cluster at `index`, inserting the key if
    /// the cluster has none.
    pub fn set_server(&mut self, index: usize, server: &str) -> Result<(), FetchError> {
        let spec = self.cluster_spec_mut(index)?;
        spec.insert(
            YamlValue::String("server".to_owned()),
            YamlValue::String(server.to_owned()),
        );
        Ok(())
    }

    /// Block-style YAML, the layout kubectl itself writes.
    pub fn to_yaml(&self) -> Result<String, FetchError> {
        serde_yaml::to_string(&self.doc).map_err(FetchError::Serialize)
    }

    pub fn into_value(self) -> YamlValue {
        self.doc
    }
}

/// Parses `text`, points cluster `index` at `server`, and serializes it again.
pub fn rewrite_server(text: &str, index: usize, server: &str) -> Result<String, FetchError> {
    let mut kc = KubeConfig::parse(text)?;
    kc.set_server(index, server)?;
    kc.to_yaml()
}

#[cfg(test)]
mod tests {
    use super::*;

    const K3S: &str = "\
apiVersion: v1
clusters:
- cluster:
    certificate-authority-data: LS0tLS1CRUdJTg==
    server: https://127.0.0.1:6443
  name: default
contexts:
- context:
    cluster: default
    user: default
  name: default
current-context: default
kind: Config
preferences: {}
users:
- name: default
  user:
    client-certificate-data: Y2VydA==
    client-key-data: a2V5
";

    #[test]
    fn rewrites_first_cluster_server() {
        let out = rewrite_server(K3S, 0, "https://[10.0.0.5]:6443").unwrap();
        let kc = KubeConfig::parse(&out).unwrap();
        assert_eq!(kc.server(0), Some("https://[10.0.0.5]:6443"));
        assert!(out.contains("server: https://[10.0.0.5]:6443"));
    }

    #[test]
    fn preserves_everything_else() {
        let out = rewrite_server(K3S, 0, "https://[10.0.0.5]:6443").unwrap();

        let mut expected = KubeConfig::parse(K3S).unwrap();
        expected.set_server(0, "https://[10.0.0.5]:6443").unwrap();
        let actual = KubeConfig::parse(&out).unwrap();

        assert_eq!(actual, expected);

        let value = actual.into_value();
        assert_eq!(value["current-context"].as_str(), Some("default"));
        assert_eq!(
            value["users"][0]["user"]["client-key-data"].as_str(),
            Some("a2V5")
        );
        assert_eq!(
            value["clusters"][0]["cluster"]["certificate-authority-data"].as_str(),
            Some("LS0tLS1CRUdJTg==")
        );
    }

    #[test]
    fn rewrite_is_an_overwrite() {
        let once = rewrite_server(K3S, 0, "https://[10.0.0.5]:6443").unwrap();
        let twice = rewrite_server(&once, 0, "https://[10.0.0.5]:6443").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn only_the_chosen_cluster_changes() {
        let text = "\
clusters:
- cluster:
    server: https://a:6443
  name: a
- cluster:
    server: https://b:6443
  name: b
";
        let out = rewrite_server(text, 1, "https://[fd00::2]:6443").unwrap();
        let kc = KubeConfig::parse(&out).unwrap();
        assert_eq!(kc.server(0), Some("https://a:6443"));
        assert_eq!(kc.server(1), Some("https://[fd00::2]:6443"));
    }

    #[test]
    fn inserts_missing_server() {
        let text = "clusters:\n- cluster:\n    insecure-skip-tls-verify: true\n  name: x\n";
        let out = rewrite_server(text, 0, "https://[h]:6443").unwrap();
        let kc = KubeConfig::parse(&out).unwrap();
        assert_eq!(kc.server(0), Some("https://[h]:6443"));
    }

    #[test]
    fn output_is_block_style() {
        let out = rewrite_server(K3S, 0, "https://[10.0.0.5]:6443").unwrap();
        assert!(out.contains("clusters:\n- cluster:\n"));
        assert!(!out.starts_with("---"));
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let err = rewrite_server("clusters: [unclosed", 0, "https://[h]:6443").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn plain_text_has_no_clusters() {
        let err = rewrite_server("Permission denied", 0, "https://[h]:6443").unwrap_err();
        assert!(matches!(err, FetchError::MissingCluster { index: 0 }));
    }

    #[test]
    fn empty_clusters_list() {
        let err = rewrite_server("clusters: []\n", 0, "https://[h]:6443").unwrap_err();
        assert!(matches!(err, FetchError::MissingCluster { index: 0 }));
    }

    #[test]
    fn cluster_must_be_a_mapping() {
        let err =
            rewrite_server("clusters:\n- cluster: nope\n", 0, "https://[h]:6443").unwrap_err();
        assert!(matches!(err, FetchError::MalformedCluster { index: 0 }));
    }
}
