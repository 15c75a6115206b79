use clap::{arg, command};
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("wallcheck")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("wallcheck")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and progress spinners").required(false))
        .arg(arg!(-v --"verbose" "Log every request and redirect to stderr").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("run")
                .about(
                    "Probe the oEmbed endpoint once per cookie profile and report which \
                response mode came back.",
                )
                .arg(
                    arg!(-p --"profile" <PROFILE>)
                        .required(false)
                        .help(
                            "A NAME=PATH cookie profile; repeat for more runs \
                        (default: guest=guest-cookies.txt, user=user-cookies.txt)",
                        )
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(--"anonymous")
                        .required(false)
                        .help("Also run once without any cookies, before the profiles")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"target" <URL>)
                        .required(false)
                        .help("The post URL to ask the oEmbed endpoint about")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(--"endpoint" <URL>)
                        .required(false)
                        .help("The oEmbed endpoint to query")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds (at least 1)")
                        .value_parser(clap::value_parser!(u64).range(1..))
                        .default_value("30"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("cookies")
                .about("List the cookies in a cookies.txt store without their values")
                .arg(
                    arg!(<PATH>)
                        .required(true)
                        .help("Path to a Netscape cookies.txt file"),
                ),
        )
}
