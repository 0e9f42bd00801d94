//! The embedded MCP server registry.
//!
//! A read-only lookup table of known servers: how to launch them, how they
//! are distributed, and which inputs they need at install time. The table is
//! embedded in the binary ([`servers`]) and wrapped in a [`Registry`] service
//! constructed once per invocation; there is no mutable global state.

mod servers;

/// Server id for the reference filesystem server, whose default paths carry
/// a `username` placeholder substituted at prompt time.
pub const FILESYSTEM_SERVER_ID: &str = "filesystem-ref";

/// Language runtime a server is implemented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Runtime {
    /// Node.js (launched through `npx`)
    Node,
    /// Python (launched through `uvx`)
    Python,
    /// Go
    Go,
    /// Anything else
    Other,
}

/// How a server is distributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Distribution {
    /// Published to the npm registry
    Npm {
        /// Package name
        package: String,
    },
    /// Published to PyPI
    Pip {
        /// Package name
        package: String,
    },
    /// Built from source; cannot be installed automatically
    Source {
        /// Binary name once built
        binary: String,
        /// Fetch path (e.g. a `go install` target)
        path: String,
    },
}

/// A declared environment variable a server reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    /// Prompt text shown when collecting the value
    pub description: String,
    /// Whether an empty submission is rejected (defaults to true)
    pub required: bool,
}

/// A single user-supplied argument resolved interactively at install time,
/// distinct from the static args baked into the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeArg {
    /// Prompt text
    pub description: String,
    /// Default value(s) pre-filled in the prompt
    pub default: Vec<String>,
    /// When true, an open-ended list of values is collected
    pub multiple: bool,
}

/// Who publishes a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publisher {
    /// Publisher slug
    pub id: String,
    /// Display name
    pub name: String,
    /// Homepage
    pub url: String,
}

/// Registry entry describing how to launch an MCP server and what inputs it
/// needs.
#[derive(Debug, Clone)]
pub struct ServerDescriptor {
    /// Unique slug, `[a-z0-9-]+`
    pub id: String,
    /// Display name
    pub name: String,
    /// One-paragraph description
    pub description: String,
    /// Publishing organization
    pub publisher: Publisher,
    /// Whether the publisher is the upstream service owner
    pub is_official: bool,
    /// Where the source lives
    pub source_url: String,
    /// SPDX license identifier, when known
    pub license: Option<String>,
    /// Implementation runtime
    pub runtime: Runtime,
    /// Distribution channel
    pub distribution: Distribution,
    /// Executable used to launch the server
    pub command: String,
    /// Arguments always passed, in order
    pub args: Vec<String>,
    /// Declared environment variables, in prompt order.
    ///
    /// A `Vec` rather than a map: the user-facing prompt sequence follows the
    /// declaration order deterministically.
    pub env: Vec<(String, EnvVar)>,
    /// Optional interactive argument appended after the static args
    pub runtime_arg: Option<RuntimeArg>,
}

/// Read-only lookup service over the embedded server table.
#[derive(Debug)]
pub struct Registry {
    servers: Vec<ServerDescriptor>,
}

impl Registry {
    /// Builds the registry from the embedded table.
    #[must_use]
    pub fn builtin() -> Self {
        Self { servers: servers::all() }
    }

    /// Looks up a server by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ServerDescriptor> {
        self.servers.iter().find(|server| server.id == id)
    }

    /// Iterates over all known servers in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &ServerDescriptor> {
        self.servers.iter()
    }

    /// Number of known servers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    /// True when the table is empty (never, in practice).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_well_formed() {
        let registry = Registry::builtin();
        let mut seen = std::collections::HashSet::new();
        for server in registry.iter() {
            assert!(seen.insert(server.id.clone()), "duplicate id {}", server.id);
            assert!(
                server.id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "id {} violates [a-z0-9-]+",
                server.id
            );
            assert!(!server.id.is_empty());
        }
    }

    #[test]
    fn lookup_finds_known_servers() {
        let registry = Registry::builtin();
        let github = registry.get("github-ref").unwrap();
        assert_eq!(github.command, "npx");
        assert_eq!(github.args, vec!["-y", "@modelcontextprotocol/server-github"]);
        assert_eq!(github.env.len(), 1);
        assert!(github.env[0].1.required);

        assert!(registry.get("no-such-server").is_none());
    }

    #[test]
    fn filesystem_server_collects_multiple_paths() {
        let registry = Registry::builtin();
        let fs = registry.get(FILESYSTEM_SERVER_ID).unwrap();
        let arg = fs.runtime_arg.as_ref().unwrap();
        assert!(arg.multiple);
        assert_eq!(arg.default, vec!["/Users/username/Desktop"]);
    }

    #[test]
    fn axiom_is_a_source_distribution() {
        let registry = Registry::builtin();
        let axiom = registry.get("axiom").unwrap();
        assert!(matches!(axiom.distribution, Distribution::Source { .. }));
    }

    #[test]
    fn env_order_follows_declaration_order() {
        let registry = Registry::builtin();
        let gitlab = registry.get("gitlab-ref").unwrap();
        let keys: Vec<&str> = gitlab.env.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["GITLAB_API_URL", "GITLAB_PERSONAL_ACCESS_TOKEN"]);
        assert!(!gitlab.env[0].1.required);
        assert!(gitlab.env[1].1.required);
    }
}
