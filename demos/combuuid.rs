//! Simple command that prints one or '-n count' COMB UUID strings, optionally at '-t unix_seconds'

use std::{env, io, io::Write, process::ExitCode};

#[derive(Debug, Default, PartialEq)]
struct Options {
    count: Option<usize>,
    unix_ts_sec: Option<i64>,
}

fn main() -> io::Result<ExitCode> {
    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-n count] [-t unix_seconds]",
                    program.as_deref().unwrap_or("combuuid")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    write_ids(&mut io::BufWriter::new(io::stdout()), &opts)?;
    Ok(ExitCode::SUCCESS)
}

fn write_ids(out: &mut impl Write, opts: &Options) -> io::Result<()> {
    for _ in 0..opts.count.unwrap_or(1) {
        let uuid = match opts.unix_ts_sec {
            Some(ts) => combuuid::combuuid_at(ts),
            None => combuuid::combuuid(),
        };
        writeln!(out, "{}", uuid)?;
    }
    out.flush()
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-n" => {
                if opts.count.is_some() {
                    return Err("option 'n' given more than once".to_owned());
                }
                let Some(n_arg) = args.next() else {
                    return Err("argument to option 'n' missing".to_owned());
                };
                let Ok(c) = n_arg.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", n_arg));
                };
                opts.count.replace(c);
            }
            "-t" => {
                if opts.unix_ts_sec.is_some() {
                    return Err("option 't' given more than once".to_owned());
                }
                let Some(t_arg) = args.next() else {
                    return Err("argument to option 't' missing".to_owned());
                };
                let Ok(ts) = t_arg.parse() else {
                    return Err(format!("invalid argument to option 't': '{}'", t_arg));
                };
                opts.unix_ts_sec.replace(ts);
            }
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        }
    }
    Ok(opts)
}
