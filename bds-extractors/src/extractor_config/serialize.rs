use bds_common::{
    log::debug,
    serde::{self, Deserialize},
    ApiKind,
};
use std::{collections::HashMap, fs::read_to_string, io::Write, str::FromStr};
use std::{fs::File, path::Path};
use toml;

use super::{ConfigError, ServerConfig};

pub const SAMPLE_SERVER_TOML: &str = include_str!("sample.toml");

#[derive(Debug, Deserialize)]
#[serde(crate = "self::serde")]
struct Config {
    #[serde(default)]
    servers: HashMap<String, Server>,
}

#[derive(Debug, Deserialize)]
#[serde(crate = "self::serde")]
struct Server {
    pretty_name: String,
    server: String,
    base_url: String,
    api_url: String,
    count_url: Option<String>,
    max_posts_per_search: u64,
    max_posts_per_page: u64,
}

/// Reads the user's `servers.toml` and adds (or overrides) its entries in `smap`.
///
/// A commented sample file is written when `path` does not exist yet.
pub fn read_server_cfg_file(
    path: &Path,
    smap: &mut HashMap<String, ServerConfig>,
) -> Result<(), ConfigError> {
    if !path.exists() {
        let mut sample_toml = File::create(path)?;
        sample_toml.write_all(SAMPLE_SERVER_TOML.as_bytes())?;
    }

    let contents = read_to_string(path)?;

    parse_server_cfg(&contents, smap)?;

    debug!("Configured servers: {:?}", smap.keys());
    Ok(())
}

pub fn parse_server_cfg(
    contents: &str,
    smap: &mut HashMap<String, ServerConfig>,
) -> Result<(), ConfigError> {
    let config: Config = toml::from_str(contents)?;

    for (id, data) in config.servers {
        let server = ApiKind::from_str(&data.server).map_err(|message| {
            ConfigError::InvalidApiType {
                server: id.clone(),
                message,
            }
        })?;

        let config = ServerConfig {
            name: id.clone(),
            pretty_name: data.pretty_name,
            server,
            user_agent: server.user_agent(),
            base_url: data.base_url,
            api_url: data.api_url,
            count_url: data.count_url,
            max_posts_per_search: data.max_posts_per_search,
            max_posts_per_page: data.max_posts_per_page,
        };

        config.validate()?;
        smap.insert(id, config);
    }

    Ok(())
}
