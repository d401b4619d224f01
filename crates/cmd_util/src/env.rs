use std::{
    env,
    fmt::Debug,
    str::FromStr,
};

use tracing_subscriber::EnvFilter;

/// Read an override for `name` from the environment, falling back to
/// `default` when the variable is unset or unparsable.
pub fn env_config<T>(name: &str, default: T) -> T
where
    T: Debug + FromStr,
    <T as FromStr>::Err: Debug,
{
    let Ok(raw) = env::var(name) else {
        return default;
    };
    match raw.parse::<T>() {
        Ok(value) => {
            tracing::info!("Overriding {name} to {value:?} from environment");
            value
        },
        Err(e) => {
            tracing::warn!("Invalid value {raw} for {name}, using {default:?}: {e:?}");
            default
        },
    }
}

/// Initialize tracing for tests. Later calls are no-ops once a subscriber is
/// installed, so it is fine to toss this into shared test helpers.
pub fn config_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .compact()
        .try_init();
}

/// Initialize tracing for command-line tools and benches.
pub fn config_tool() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).compact().try_init();
}
