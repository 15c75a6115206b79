pub mod probe;
pub mod report;

use colored::Colorize;

pub fn print_banner() {
    let banner = r#"
 _ _ _ ____ _    _    ____ _  _ ____ ____ _  _
 | | | |__| |    |    |    |__| |___ |    |_/
 |_|_| |  | |___ |___ |___ |  | |___ |___ | \_
"#;
    println!("{}", banner.bright_cyan().bold());
    println!(
        "  {} {}\n",
        "which wall does the embed endpoint put up?".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
}
