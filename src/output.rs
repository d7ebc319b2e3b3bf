use owo_colors::OwoColorize;

/// Consistent, coloured user-facing lines for the CLI. Colours are enabled only
/// when the stream is a TTY.
fn stdout_is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if stdout_is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Write an interactive question to stderr without a trailing newline.
pub fn print_prompt(msg: &str) {
    use std::io::Write;
    if stderr_is_tty() {
        eprint!("{} {}", "?".magenta().bold(), msg);
    } else {
        eprint!("{}", msg);
    }
    let _ = std::io::stderr().flush();
}

/// Plain line without prefix; used for the final count that scripts may parse.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}
