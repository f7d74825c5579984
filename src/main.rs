//! deepdump binary. Dumps a range of DeepMind programs for backup.

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use deepdump::{DumpSession, SysExInputPort, SysExOutputPort};
use tracing::error;

const ABOUT: &str = "\
Dumps patches from a Behringer DeepMind synth for backup.

Input and output port names can be ascertained by using the -l switch
which will display all input and output ports and exit.
First and last program numbers are inclusive, and are zero indexed (ie
one less than is displayed on the synth).
--timeout gives up if the patches have not all arrived within that many
seconds; without it deepdump waits until they do.";

struct Args {
    output_port: String,
    input_port: String,
    bank: String,
    first: String,
    last: String,
    output_dir: String,
    timeout: Option<String>,
}

enum Command {
    ListPorts,
    Usage,
    Dump(Args),
}

fn parse_args(args: &[String]) -> Command {
    if args.iter().any(|a| a == "-l") {
        return Command::ListPorts;
    }

    let mut positional = Vec::new();
    let mut timeout = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--timeout" {
            match iter.next() {
                Some(value) => timeout = Some(value.clone()),
                None => return Command::Usage,
            }
        } else {
            positional.push(arg.clone());
        }
    }

    if positional.len() < 6 {
        return Command::Usage;
    }
    let mut positional = positional.into_iter();
    let mut next = || positional.next().unwrap_or_default();
    Command::Dump(Args {
        output_port: next(),
        input_port: next(),
        bank: next(),
        first: next(),
        last: next(),
        output_dir: next(),
        timeout,
    })
}

fn print_usage(program: &str) {
    let me = Path::new(program)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "deepdump".to_string());
    let pad = " ".repeat(me.len() + 8);
    println!();
    println!("USAGE: {me} <output midi port> <input midi port> <bank A-H>");
    println!("{pad}<first program no.> <last program no.> <output path>");
    println!("{pad}[-l] [--timeout <seconds>]");
    println!();
    println!("{ABOUT}");
    println!();
}

fn print_ports() -> deepdump::Result<()> {
    let inputs = SysExInputPort::list_devices()?;
    let outputs = SysExOutputPort::list_devices()?;

    println!();
    println!("Inputs:");
    for device in &inputs {
        println!("{}", device.name);
    }
    println!();
    println!("Outputs:");
    for device in &outputs {
        println!("{}", device.name);
    }
    Ok(())
}

fn parse_number(what: &str, value: &str) -> deepdump::Result<i32> {
    value
        .trim()
        .parse()
        .map_err(|_| deepdump::Error::InvalidConfig(format!("{what} '{value}' is not a number")))
}

fn dump(args: Args) -> deepdump::Result<()> {
    let mut builder = DumpSession::builder()
        .bank(args.bank)
        .programs(
            parse_number("first program", &args.first)?,
            parse_number("last program", &args.last)?,
        )
        .output_dir(args.output_dir);

    if let Some(timeout) = args.timeout {
        let secs: f64 = timeout.trim().parse().map_err(|_| {
            deepdump::Error::InvalidConfig(format!("timeout '{timeout}' is not a number"))
        })?;
        let timeout = Duration::try_from_secs_f64(secs).map_err(|_| {
            deepdump::Error::InvalidConfig(format!("timeout '{timeout}' is out of range"))
        })?;
        builder = builder.timeout(timeout);
    }

    // Validate before touching any port.
    let session = builder.build()?;

    let mut output = SysExOutputPort::connect_by_name(&args.output_port)?;
    let mut input = SysExInputPort::connect_by_name(&args.input_port)?;

    session.run(&mut output, &mut input)?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let argv: Vec<String> = env::args().collect();
    let program = argv.first().map(String::as_str).unwrap_or("deepdump");

    let result = match parse_args(argv.get(1..).unwrap_or_default()) {
        Command::ListPorts => print_ports(),
        Command::Usage => {
            print_usage(program);
            return ExitCode::FAILURE;
        }
        Command::Dump(args) => dump(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
