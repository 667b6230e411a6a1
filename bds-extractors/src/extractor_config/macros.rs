#[macro_export]
macro_rules! server_config {
    ($name:expr, $pretty_name:expr, $server:expr, $base_url:expr, $api_url:expr, $count_url:expr, $max_per_search:expr, $max_per_page:expr) => {
        ServerConfig {
            name: String::from($name),
            pretty_name: String::from($pretty_name),
            server: $server,
            user_agent: $server.user_agent(),
            base_url: String::from($base_url),
            api_url: String::from($api_url),
            count_url: $count_url,
            max_posts_per_search: $max_per_search,
            max_posts_per_page: $max_per_page,
        }
    };
}
