/// Intercept messages using the `log` crate and print them to STDERR. Defaults to `info` unless
/// `RUST_LOG` says otherwise. Safe to call more than once; only the first call installs anything.
pub fn setup() {
    use env_logger::{Builder, Env};
    let _ = Builder::from_env(Env::default().default_filter_or("info")).try_init();
}
