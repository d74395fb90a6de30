use std::fs;

const DEFAULT_CONFIG: &str = "src/default_config.toml";
const SECTIONS: [&str; 5] = ["report", "page", "styles", "email", "images"];

fn main() {
    println!("cargo:rerun-if-changed={DEFAULT_CONFIG}");

    let content = fs::read_to_string(DEFAULT_CONFIG)
        .unwrap_or_else(|e| panic!("finreport: cannot read {DEFAULT_CONFIG}: {e}"));

    let table = content
        .parse::<toml::Table>()
        .unwrap_or_else(|e| panic!("finreport: {DEFAULT_CONFIG} is not valid TOML: {e}"));

    // Config::compiled_default falls back to built-in defaults on any error,
    // so a missing section would otherwise go unnoticed.
    for section in SECTIONS {
        if !table.get(section).is_some_and(toml::Value::is_table) {
            panic!("finreport: {DEFAULT_CONFIG} is missing the [{section}] table");
        }
    }
}
