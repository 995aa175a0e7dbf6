use tracing_subscriber::EnvFilter;

const OWN_CRATES: [&str; 2] = ["ks_core", "kstatus"];

// A bare level like "debug" applies only to our own crates (everything else stays at warn, kube
// and friends are chatty); anything that already looks like a filter directive is used as-is.
pub fn env_filter(verbosity: &str) -> String {
    let verbosity = verbosity.trim();
    if verbosity.contains('=') || verbosity.contains(',') {
        return verbosity.into();
    }

    let mut directives = vec!["warn".to_string()];
    directives.extend(OWN_CRATES.iter().map(|krate| format!("{krate}={verbosity}")));
    directives.join(",")
}

// stdout is reserved for status notifications, so the CLI logs to stderr
pub fn setup_for_cli(verbosity: &str) {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::new(env_filter(verbosity)))
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
}
