use std::{collections::HashMap, env, fs, path::PathBuf};

use bds_common::ApiKind;
use bds_extractors::extractor_config::{
    serialize::read_server_cfg_file, ServerConfig, DEFAULT_SERVERS,
};
use log::debug;

use super::{Cli, AVAILABLE_SERVERS};
use crate::error::CliError;

/// Known servers merged with the ones in the user's `servers.toml`.
///
/// The config folder is `$BDS_SERVER_CFG` when set, the project config dir otherwise.
pub fn get_servers<'a>() -> Result<&'a HashMap<String, ServerConfig>, CliError> {
    AVAILABLE_SERVERS.get_or_try_init(|| {
        let mut servers = DEFAULT_SERVERS.clone();

        let cfg_path = match env::var("BDS_SERVER_CFG") {
            Ok(path) => PathBuf::from(path),
            Err(_) => ApiKind::config_dir()?,
        };

        if !cfg_path.exists() {
            fs::create_dir_all(&cfg_path)?;
        }

        let cfg_path = cfg_path.join("servers.toml");
        debug!("Reading server config from {}", cfg_path.display());

        read_server_cfg_file(&cfg_path, &mut servers)?;

        Ok(servers)
    })
}

/// Picks the server `--api` points to.
pub fn resolve_server(args: &Cli) -> Result<ServerConfig, CliError> {
    resolve_server_in(get_servers()?, args)
}

/// Looks `--api` up in `servers`. Anything that isn't a known name and looks like a URL is taken
/// as a custom Gelbooru-compatible API, which must come with both post limits.
pub fn resolve_server_in(
    servers: &HashMap<String, ServerConfig>,
    args: &Cli,
) -> Result<ServerConfig, CliError> {
    if let Some(server) = servers.get(&args.api) {
        return Ok(server.clone());
    }

    if !args.api.contains("://") {
        return Err(CliError::ServerNotExists {
            server: args.api.clone(),
        });
    }

    let (Some(per_search), Some(per_page)) = (args.max_per_search, args.max_per_page) else {
        return Err(CliError::MissingCustomLimits {
            api: args.api.clone(),
        });
    };

    let server = ServerConfig::custom_gelbooru(&args.api, per_search, per_page)?;
    debug!("Using custom server {}", server.api_url);

    Ok(server)
}
