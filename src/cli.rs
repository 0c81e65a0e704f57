// cli.rs
//! Informational flags handled before anything else runs.

#[derive(Debug, PartialEq)]
pub enum InfoRequest {
    Help,
    Version,
}

/// `-h`/`--help` or `-V`/`--version` anywhere on the command line.
pub fn info_request<S: AsRef<str>>(raw: &[S]) -> Option<InfoRequest> {
    raw.iter().find_map(|arg| match arg.as_ref() {
        "-h" | "--help" => Some(InfoRequest::Help),
        "-V" | "--version" => Some(InfoRequest::Version),
        _ => None,
    })
}

pub fn print_info(request: &InfoRequest) {
    match request {
        InfoRequest::Help => print_help(),
        InfoRequest::Version => print_version(),
    }
}

fn print_version() {
    println!("local-viewer {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    print_version();
    println!();
    println!("USAGE:");
    println!("    local-viewer [URL [TITLE [WIDTH [HEIGHT [FULLSCREEN [MAXIMIZED [NO_RESIZE [ON_TOP [X [Y]]]]]]]]]] [--KEY=VALUE...]");
    println!();
    println!("POSITIONAL:");
    println!("    URL          http(s):// or file:// URI, or a path (default: ./index.htm)");
    println!("    TITLE        Window title (default: \"Local HTML Viewer\")");
    println!("    WIDTH        Window width (default: 1200)");
    println!("    HEIGHT       Window height (default: 800)");
    println!("    FULLSCREEN   true/1 to start fullscreen");
    println!("    MAXIMIZED    true/1 to start maximized");
    println!("    NO_RESIZE    true/1 to disable resizing");
    println!("    ON_TOP       true/1 to keep the window above others");
    println!("    X, Y         Window position, or \"center\" (default: centered)");
    println!();
    println!("NAMED (override positional values):");
    println!("    --title=  --width=  --height=  --fullscreen  --maximized");
    println!("    --resizable=  --alwaysontop  --x=  --y=  --icon=PATH");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -V, --version    Print version information");
}
