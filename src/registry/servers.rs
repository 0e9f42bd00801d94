//! The embedded server table.
//!
//! One entry per known MCP server, in registry order. Descriptions, args and
//! environment variables mirror what each server's own documentation declares.

use super::{Distribution, EnvVar, Publisher, Runtime, RuntimeArg, ServerDescriptor};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn required(key: &str, description: &str) -> (String, EnvVar) {
    (key.to_string(), EnvVar { description: description.to_string(), required: true })
}

fn optional(key: &str, description: &str) -> (String, EnvVar) {
    (key.to_string(), EnvVar { description: description.to_string(), required: false })
}

fn npm(package: &str) -> Distribution {
    Distribution::Npm { package: package.to_string() }
}

fn pip(package: &str) -> Distribution {
    Distribution::Pip { package: package.to_string() }
}

fn publisher(id: &str, name: &str, url: &str) -> Publisher {
    Publisher { id: id.to_string(), name: name.to_string(), url: url.to_string() }
}

/// Publisher of the Model Context Protocol reference servers.
fn reference_publisher() -> Publisher {
    publisher("modelcontextprotocol", "Anthropic, PBC", "https://modelcontextprotocol.io/")
}

/// Builds a reference server entry: npm-distributed, published by the MCP
/// project, MIT licensed.
fn reference_server(
    id: &str,
    name: &str,
    description: &str,
    package: &str,
    source_path: &str,
    env: Vec<(String, EnvVar)>,
) -> ServerDescriptor {
    ServerDescriptor {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{description} A Model Context Protocol reference server."),
        publisher: reference_publisher(),
        is_official: false,
        source_url: format!(
            "https://github.com/modelcontextprotocol/servers/tree/main/src/{source_path}"
        ),
        license: Some("MIT".to_string()),
        runtime: Runtime::Node,
        distribution: npm(package),
        command: "npx".to_string(),
        args: strings(&["-y", package]),
        env,
        runtime_arg: None,
    }
}

/// All registry entries, in registry order.
pub(super) fn all() -> Vec<ServerDescriptor> {
    vec![
        ServerDescriptor {
            id: "artemis".to_string(),
            name: "Artemis Analytics".to_string(),
            description: "Pull the latest fundamental crypto data from Artemis natively into \
                          your favorite chatbot interface."
                .to_string(),
            publisher: publisher("Artemis-xyz", "Artemis Analytics Inc.", "https://www.artemis.xyz/"),
            is_official: true,
            source_url: "https://github.com/Artemis-xyz/artemis-mcp".to_string(),
            license: Some("MIT".to_string()),
            runtime: Runtime::Python,
            distribution: pip("artemis-mcp"),
            command: "uvx".to_string(),
            args: strings(&["artemis-mcp"]),
            env: vec![required(
                "ARTEMIS_API_KEY",
                "Your Artemis API key from https://app.artemis.xyz/settings.",
            )],
            runtime_arg: None,
        },
        reference_server(
            "aws-kb-retrieval-server-ref",
            "AWS Knowledge Base",
            "Retrieval from AWS Knowledge Base using Bedrock Agent Runtime.",
            "@modelcontextprotocol/server-aws-kb-retrieval",
            "aws-kb-retrieval-server",
            vec![
                required("AWS_ACCESS_KEY_ID", "Your AWS access key ID."),
                required("AWS_REGION", "Your AWS region."),
                required("AWS_SECRET_ACCESS_KEY", "Your AWS secret access key."),
            ],
        ),
        ServerDescriptor {
            id: "axiom".to_string(),
            name: "Axiom".to_string(),
            description: "Query and analyze your Axiom logs, traces, and all other event data \
                          in natural language"
                .to_string(),
            publisher: publisher("axiomhq", "Axiom, Inc.", "https://axiom.co"),
            is_official: true,
            source_url: "https://github.com/axiomhq/mcp-server-axiom".to_string(),
            license: Some("MIT".to_string()),
            runtime: Runtime::Go,
            distribution: Distribution::Source {
                binary: "axiom-mcp".to_string(),
                path: "github.com/axiomhq/axiom-mcp@latest".to_string(),
            },
            command: "${HOME}/go/bin/axiom-mcp".to_string(),
            args: vec![],
            env: vec![
                optional("AXIOM_DATASETS_BURST", "The burst limit for datasets."),
                optional("AXIOM_DATASETS_RATE", "The rate limit for datasets."),
                required("AXIOM_ORG_ID", "Your Axiom organization ID."),
                optional("AXIOM_QUERY_BURST", "The burst limit for queries."),
                optional("AXIOM_QUERY_RATE", "The rate limit for queries."),
                required("AXIOM_TOKEN", "Your Axiom token."),
                required("AXIOM_URL", "Your Axiom URL."),
            ],
            runtime_arg: None,
        },
        reference_server(
            "brave-search-ref",
            "Brave Search",
            "Web and local search using Brave's Search API.",
            "@modelcontextprotocol/server-brave-search",
            "brave-search",
            vec![required(
                "BRAVE_API_KEY",
                "Your Brave Search API key. See: https://brave.com/search/api",
            )],
        ),
        ServerDescriptor {
            id: "browserbase".to_string(),
            name: "Browserbase".to_string(),
            description: "Automate browser interactions in the cloud (e.g. web navigation, data \
                          extraction, form filling, and more)"
                .to_string(),
            publisher: publisher("browserbase", "Browserbase Inc.", "https://www.browserbase.com/"),
            is_official: true,
            source_url: "https://github.com/browserbase/mcp-server-browserbase/tree/main/browserbase"
                .to_string(),
            license: Some("MIT".to_string()),
            runtime: Runtime::Node,
            distribution: npm("@browserbasehq/mcp-browserbase"),
            command: "npx".to_string(),
            args: strings(&["-y", "@browserbasehq/mcp-browserbase"]),
            env: vec![
                required(
                    "BROWSERBASE_API_KEY",
                    "Your Browserbase API key. Find it at: https://www.browserbase.com/settings",
                ),
                required(
                    "BROWSERBASE_PROJECT_ID",
                    "Your Browserbase project ID. Find it at: https://www.browserbase.com/settings",
                ),
            ],
            runtime_arg: None,
        },
        ServerDescriptor {
            id: "chakra".to_string(),
            name: "Chakra".to_string(),
            description: "Integrate data from the open data marketplace and your organization \
                          natively into chat."
                .to_string(),
            publisher: publisher("Chakra-Network", "Chakra Digital Labs, Inc.", "https://chakra.dev/"),
            is_official: true,
            source_url: "https://github.com/Chakra-Network/mcp-server".to_string(),
            license: Some("MIT".to_string()),
            runtime: Runtime::Python,
            distribution: pip("chakra-mcp"),
            command: "uvx".to_string(),
            args: strings(&["chakra-mcp"]),
            env: vec![required(
                "db_session_key",
                "Your Chakra database session key. Find it at: https://console.chakra.dev/settings",
            )],
            runtime_arg: None,
        },
        reference_server(
            "everart-ref",
            "EverArt",
            "AI image generation using various models using EverArt.",
            "@modelcontextprotocol/server-everart",
            "everart",
            vec![required(
                "EVERART_API_KEY",
                "Your EverArt API key. Find it at: https://www.everart.ai/api",
            )],
        ),
        reference_server(
            "everything-ref",
            "Everything",
            "This MCP server attempts to exercise all the features of the MCP protocol. It is \
             not intended to be a useful server, but rather a test server for builders of MCP \
             clients.",
            "@modelcontextprotocol/server-everything",
            "everything",
            vec![],
        ),
        ServerDescriptor {
            id: "exa".to_string(),
            name: "Exa Search".to_string(),
            description: "This setup allows AI models to get real-time web information in a safe \
                          and controlled way."
                .to_string(),
            publisher: publisher("exa-labs", "Exa Labs, Inc.", "https://exa.ai"),
            is_official: true,
            source_url: "https://github.com/exa-labs/exa-mcp-server".to_string(),
            license: None,
            runtime: Runtime::Node,
            distribution: npm("exa-mcp-server"),
            command: "npx".to_string(),
            args: strings(&["-y", "exa-mcp-server"]),
            env: vec![required(
                "EXA_API_KEY",
                "Your Exa API key. Find it at: https://dashboard.exa.ai/api-keys",
            )],
            runtime_arg: None,
        },
        {
            let mut fetch = reference_server(
                "fetch-ref",
                "Fetch",
                "Web content fetching and conversion for efficient LLM usage.",
                "mcp-server-fetch",
                "fetch",
                vec![],
            );
            fetch.runtime = Runtime::Python;
            fetch.distribution = pip("mcp-server-fetch");
            fetch.command = "uvx".to_string();
            fetch.args = strings(&["mcp-server-fetch"]);
            fetch
        },
        {
            let mut filesystem = reference_server(
                "filesystem-ref",
                "Filesystem",
                "Local filesystem access with configurable allowed paths.",
                "@modelcontextprotocol/server-filesystem",
                "filesystem",
                vec![],
            );
            filesystem.runtime_arg = Some(RuntimeArg {
                description: "Directories that the server will be allowed to access".to_string(),
                default: strings(&["/Users/username/Desktop"]),
                multiple: true,
            });
            filesystem
        },
        reference_server(
            "gdrive-ref",
            "Google Drive",
            "File access and search capabilities for Google Drive.",
            "@modelcontextprotocol/server-gdrive",
            "gdrive",
            vec![],
        ),
        {
            let mut git = reference_server(
                "git-ref",
                "Git",
                "Tools to read, search, and manipulate Git repositories.",
                "mcp-server-git",
                "git",
                vec![],
            );
            git.runtime = Runtime::Python;
            git.distribution = pip("mcp-server-git");
            git.command = "uvx".to_string();
            git.args = strings(&["mcp-server-git", "--repository"]);
            git.runtime_arg = Some(RuntimeArg {
                description: "Filepath to the Git repository".to_string(),
                default: strings(&["path/to/git/repo"]),
                multiple: false,
            });
            git
        },
        reference_server(
            "github-ref",
            "GitHub",
            "GitHub repository access and management.",
            "@modelcontextprotocol/server-github",
            "github",
            vec![required(
                "GITHUB_PERSONAL_ACCESS_TOKEN",
                "Your GitHub Personal Access Token. Find it at: https://github.com/settings/tokens",
            )],
        ),
        reference_server(
            "gitlab-ref",
            "GitLab",
            "GitLab project access and management.",
            "@modelcontextprotocol/server-gitlab",
            "gitlab",
            vec![
                optional(
                    "GITLAB_API_URL",
                    "GitLab API URL. Optional, defaults to gitlab.com, configure for self-hosted \
                     instances.",
                ),
                required(
                    "GITLAB_PERSONAL_ACCESS_TOKEN",
                    "Your GitLab Personal Access Token. See: \
                     https://docs.gitlab.com/ee/user/profile/personal_access_tokens.html",
                ),
            ],
        ),
        reference_server(
            "google-maps-ref",
            "Google Maps",
            "Google Maps location services, directions, and place details.",
            "@modelcontextprotocol/server-google-maps",
            "google-maps",
            vec![required(
                "GOOGLE_MAPS_API_KEY",
                "Your Google Maps API key. Find it at: \
                 https://console.cloud.google.com/google/maps-apis/credentials",
            )],
        ),
        reference_server(
            "memory-ref",
            "Memory",
            "Knowledge graph-based persistent memory system.",
            "@modelcontextprotocol/server-memory",
            "memory",
            vec![],
        ),
        ServerDescriptor {
            id: "playwright-mcp-server".to_string(),
            name: "Playwright".to_string(),
            description: "This server enables LLMs to interact with web pages, take screenshots, \
                          and execute JavaScript in a real browser environment using Playwright."
                .to_string(),
            publisher: publisher(
                "executeautomation",
                "ExecuteAutomation",
                "https://github.com/executeautomation",
            ),
            is_official: false,
            source_url: "https://github.com/executeautomation/mcp-playwright".to_string(),
            license: Some("MIT".to_string()),
            runtime: Runtime::Node,
            distribution: npm("@executeautomation/playwright-mcp-server"),
            command: "npx".to_string(),
            args: strings(&["-y", "@executeautomation/playwright-mcp-server"]),
            env: vec![],
            runtime_arg: None,
        },
        {
            let mut postgres = reference_server(
                "postgres-ref",
                "PostgreSQL",
                "Read-only local PostgreSQL database access with schema inspection.",
                "@modelcontextprotocol/server-postgres",
                "postgres",
                vec![],
            );
            postgres.runtime_arg = Some(RuntimeArg {
                description: "PostgreSQL connection string (Replace /mydb with your database name)"
                    .to_string(),
                default: strings(&["postgresql://localhost/mydb"]),
                multiple: false,
            });
            postgres
        },
        reference_server(
            "puppeteer-ref",
            "Puppeteer",
            "Browser automation and web scraping using Puppeteer.",
            "@modelcontextprotocol/server-puppeteer",
            "puppeteer",
            vec![],
        ),
        {
            let mut sentry = reference_server(
                "sentry-ref",
                "Sentry",
                "Retrieving and analyzing issues from Sentry.io.",
                "mcp-server-sentry",
                "sentry",
                vec![],
            );
            sentry.runtime = Runtime::Python;
            sentry.distribution = pip("mcp-server-sentry");
            sentry.command = "uvx".to_string();
            sentry.args = strings(&["mcp-server-sentry", "--auth-token"]);
            sentry.runtime_arg = Some(RuntimeArg {
                description: "Your Sentry authentication token".to_string(),
                default: strings(&["YOUR_SENTRY_TOKEN"]),
                multiple: false,
            });
            sentry
        },
        reference_server(
            "sequential-thinking-ref",
            "Sequential Thinking",
            "Dynamic and reflective problem-solving through thought sequences.",
            "@modelcontextprotocol/server-sequential-thinking",
            "sequentialthinking",
            vec![],
        ),
        reference_server(
            "slack-ref",
            "Slack",
            "Slack channel management and messaging capabilities.",
            "@modelcontextprotocol/server-slack",
            "slack",
            vec![
                required(
                    "SLACK_BOT_TOKEN",
                    "Your Slack bot token. Find it at: https://api.slack.com/apps",
                ),
                required(
                    "SLACK_TEAM_ID",
                    "Your Slack team/workspace ID, See: https://slack.com/help/articles/221769328-Locate-your-Slack-URL-or-ID#find-your-workspace-or-org-id",
                ),
            ],
        ),
        {
            let mut sqlite = reference_server(
                "sqlite-ref",
                "SQLite",
                "Local SQLite database interaction and business intelligence capabilities.",
                "mcp-server-sqlite",
                "sqlite",
                vec![],
            );
            sqlite.runtime = Runtime::Python;
            sqlite.distribution = pip("mcp-server-sqlite");
            sqlite.command = "uvx".to_string();
            sqlite.args = strings(&["mcp-server-sqlite", "--db-path"]);
            sqlite.runtime_arg = Some(RuntimeArg {
                description: "Path to your SQLite database file".to_string(),
                default: strings(&["~/test.db"]),
                multiple: false,
            });
            sqlite
        },
        ServerDescriptor {
            id: "stagehand".to_string(),
            name: "Stagehand by Browserbase".to_string(),
            description: "This server enables LLMs to interact with web pages, perform actions, \
                          extract data, and observe possible actions in a real browser environment"
                .to_string(),
            publisher: publisher("browserbase", "Browserbase Inc.", "https://www.browserbase.com/"),
            is_official: true,
            source_url: "https://github.com/browserbase/mcp-server-browserbase/tree/main/stagehand"
                .to_string(),
            license: Some("MIT".to_string()),
            runtime: Runtime::Node,
            distribution: npm("@browserbasehq/mcp-stagehand"),
            command: "npx".to_string(),
            args: strings(&["-y", "@browserbasehq/mcp-stagehand"]),
            env: vec![
                required(
                    "BROWSERBASE_API_KEY",
                    "Your Browserbase API key. Find it at: https://www.browserbase.com/settings",
                ),
                required(
                    "BROWSERBASE_PROJECT_ID",
                    "Your Browserbase project ID. Find it at: https://www.browserbase.com/settings",
                ),
                required(
                    "OPENAI_API_KEY",
                    "Your OpenAI API key. Find it at: https://platform.openai.com/api-keys",
                ),
            ],
            runtime_arg: None,
        },
        {
            let mut time = reference_server(
                "time-ref",
                "Time",
                "Time and timezone conversion capabilities.",
                "mcp-server-time",
                "time",
                vec![],
            );
            time.runtime = Runtime::Python;
            time.distribution = pip("mcp-server-time");
            time.command = "uvx".to_string();
            time.args = strings(&["mcp-server-time"]);
            time
        },
        ServerDescriptor {
            id: "alanagoyal".to_string(),
            name: "Alana Goyal".to_string(),
            description: "a model context protocol (mcp) server that provides ai assistants with \
                          information about alana goyal and basecase, based on alanagoyal.com and \
                          basecase.vc. the server integrates with popular ai development \
                          environments like windsurf and cursor."
                .to_string(),
            publisher: publisher("alanagoyal", "Alana Goyal", "https://alanagoyal.com/"),
            is_official: false,
            source_url: "https://github.com/alanagoyal/mcp-server".to_string(),
            license: Some("ISC".to_string()),
            runtime: Runtime::Node,
            distribution: npm("@alanagoyal/mcp-server"),
            command: "npx".to_string(),
            args: strings(&["-y", "@alanagoyal/mcp-server@latest"]),
            env: vec![],
            runtime_arg: None,
        },
    ]
}
