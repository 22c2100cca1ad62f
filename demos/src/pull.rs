//! Walks the whole surface against a live PLC: device info, state, catalog
//! enumeration, symbol expansion, filtered sum- and block-reads.
//!
//! ```text
//! pull <target-ip> <target-ams> <source-ams> [filter-part ...]
//! pull 10.0.0.1 5.0.0.0.1.1:851 10.33.0.1.1.1:32733 config 'machine\[0\]'
//! ```

use std::env;
use std::process::ExitCode;
use tc2ads::client::{AdsClient, AdsConnection, SymbolList, Timeouts};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let [target_ip, target_ams, source_ams, filter_parts @ ..] = args.as_slice() else {
        eprintln!("usage: pull <target-ip> <target-ams> <source-ams> [filter-part ...]");
        return ExitCode::FAILURE;
    };

    match run(target_ip, target_ams, source_ams, filter_parts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    target_ip: &str,
    target_ams: &str,
    source_ams: &str,
    filter_parts: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let conn = AdsConnection::parse(target_ip, target_ams, source_ams)?;
    let client = AdsClient::new(conn, Timeouts::default());

    let info = client.read_device_info()?;
    println!("device: {} v{}", info.name, info.version());

    let state = client.read_state()?;
    println!("state: {} (device state {})", state.ads_state, state.device_state);

    let types = client.get_types()?;
    let symbols = client.get_symbols()?;
    println!("catalog: {} types, {} symbols", types.len(), symbols.len());

    // Dissolve structs and arrays into addressable leaves.
    let list = SymbolList::build(&types, &symbols, true);
    println!("expanded: {} leaves", list.len());

    if filter_parts.is_empty() {
        print!("{list}");
        return Ok(());
    }

    let parts: Vec<&str> = filter_parts.iter().map(String::as_str).collect();
    let mut group = list.filter(&parts)?;
    println!("filter {:?} selected {} symbols", parts, group.len());

    let statuses = client.sum_read(&mut group)?;
    for (symbol, status) in group.iter().zip(&statuses) {
        if status.is_ok() {
            println!("  {symbol}");
        } else {
            println!("  {} failed: {status}", symbol.path);
        }
    }

    // The same selection as one contiguous block, if it qualifies.
    match client.block_read(&mut group) {
        Ok(span) => {
            println!("block read of {span} bytes:");
            print!("{group}");
        }
        Err(err) => println!("block read not possible here: {err}"),
    }

    client.close();
    Ok(())
}
