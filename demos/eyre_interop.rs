use errwrap::{labeled_by, Context, Error};

fn read_config() -> Result<String, Error> {
    std::fs::read_to_string("/this/path/does/not/exist.toml")
        .context("loading the configuration")
        .labeled(["config", "io"])
}

fn start() -> color_eyre::eyre::Result<()> {
    read_config()?;
    Ok(())
}

fn main() {
    let err = read_config().unwrap_err();
    assert!(labeled_by(&err, "config"));
    assert_eq!(
        errwrap::detailed_error(&err).lines().count(),
        2,
        "{}",
        errwrap::detailed_error(&err)
    );

    let report = start().unwrap_err();
    let chain: Vec<String> = report.chain().map(ToString::to_string).collect();
    assert_eq!(chain[0], "loading the configuration");
    assert_eq!(chain.len(), 2);
}
