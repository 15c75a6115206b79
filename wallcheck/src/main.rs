use wallcheck::commands::command_argument_builder;
use wallcheck::handlers::{banner_allowed, handle_cookies, handle_run, init_logging};
use wallcheck_core::print_banner;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");
    let verbose = chosen_command.get_flag("verbose");

    // JSON reports own stdout, so the banner stays out of the way
    if banner_allowed(&chosen_command) {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        // No subcommand provided, just show the banner
        return;
    }

    init_logging(verbose);

    match chosen_command.subcommand() {
        Some(("run", primary_command)) => handle_run(primary_command, quiet).await,
        Some(("cookies", primary_command)) => {
            if let Err(e) = handle_cookies(primary_command) {
                eprintln!("✗ {:#}", e);
                std::process::exit(1);
            }
        }
        _ => unreachable!("clap should ensure we don't get here"),
    }
}
