#[derive(Clone, Debug)]
pub struct WikiConfig {
    pub http_port: u16,
    pub storage_endpoint: String,
    pub max_connections: u32,
    pub backup_user_agent: String,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            storage_endpoint: "wikidb.queue".to_string(),
            max_connections: 15,
            backup_user_agent: "wiki-server".to_string(),
        }
    }
}

impl WikiConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let http_port = std::env::var("HTTP_SERVER_PORT")
            .ok()
            .and_then(|val| val.parse::<u16>().ok())
            .unwrap_or(defaults.http_port);

        // names the backing store; for the bundled sqlite backend this is a url or a file path
        let storage_endpoint =
            std::env::var("WIKIDB_QUEUE").unwrap_or(defaults.storage_endpoint);

        let max_connections = std::env::var("MAX_CONNECTIONS")
            .ok()
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(defaults.max_connections);

        let backup_user_agent =
            std::env::var("BACKUP_USER_AGENT").unwrap_or(defaults.backup_user_agent);

        Self {
            http_port,
            storage_endpoint,
            max_connections,
            backup_user_agent,
        }
    }
}
