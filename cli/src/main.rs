use anyhow::{Context, Result, bail};
use num_bigint::{BigInt, Sign};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::{env, process};
use zeroth_config::ZerothConfig;
use zeroth_shareset::{Selection, ShareSetDocument};
use zeroth_threshold::{decode, encode};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let cmd = &args[1];

    match cmd.as_str() {
        "recover" => {
            let result = parse_recover_args(&args[2..]).and_then(recover);
            if let Err(e) = result {
                eprintln!("❌ Error: {:#}", e);
                process::exit(1);
            }
        }
        "decode" => {
            if args.len() < 4 {
                println!("Usage: decode <digits> <base>");
                println!("  digits - Digit string, letters case-insensitive");
                println!("  base   - Radix between 2 and 36");
                return;
            }
            match decode_value(&args[2], &args[3]) {
                Ok(value) => println!("{}", value),
                Err(e) => {
                    eprintln!("❌ Error: {:#}", e);
                    process::exit(1);
                }
            }
        }
        "config" => {
            print!("{}", ZerothConfig::generate_sample());
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        _ => {
            println!("❌ Unknown command: {}", cmd);
            println!();
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Zeroth - Threshold Secret Reconstruction");
    println!();
    println!("USAGE:");
    println!("  zeroth <command> [args]");
    println!();
    println!("COMMANDS:");
    println!("  recover [file] [options]   Reconstruct the secret from a share-set document");
    println!("  decode <digits> <base>     Print the decimal value of a digit string");
    println!("  config                     Print a sample config file");
    println!("  help                       Show this help message");
    println!();
    println!("RECOVER OPTIONS:");
    println!("  [file]                     Share-set JSON ('-' for stdin, default: config or stdin)");
    println!("  --select <mode>            first | available | 1,3,6 (default: first)");
    println!("  --radix <n>                Output radix, 2-36 (default: 10)");
    println!("  --config <path>            Config file to load");
    println!();
    println!("EXAMPLES:");
    println!("  zeroth recover shares.json                 # Use shares 1..=k");
    println!("  zeroth recover shares.json --select 1,2,6  # Use specific shares");
    println!("  cat shares.json | zeroth recover -         # Read from stdin");
    println!("  zeroth decode 213 4                        # Prints 39");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("  ZEROTH_CONFIG        Config file path");
    println!("  ZEROTH_INPUT         Share-set document path");
    println!("  ZEROTH_SELECTION     Share selection mode");
    println!("  ZEROTH_OUTPUT_RADIX  Output radix");
    println!("  RUST_LOG             Log level (debug/info/warn/error)");
}

#[derive(Debug, Default, PartialEq, Eq)]
struct RecoverArgs {
    input: Option<String>,
    selection: Option<String>,
    radix: Option<u32>,
    config: Option<PathBuf>,
}

fn parse_recover_args(args: &[String]) -> Result<RecoverArgs> {
    let mut parsed = RecoverArgs::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--select" | "-s" => {
                let mode = args.get(i + 1).context("--select needs a value")?;
                parsed.selection = Some(mode.clone());
                i += 1;
            }
            "--radix" | "-r" => {
                let radix = args.get(i + 1).context("--radix needs a value")?;
                let radix = radix
                    .parse()
                    .with_context(|| format!("Invalid radix: {}", radix))?;
                parsed.radix = Some(radix);
                i += 1;
            }
            "--config" | "-c" => {
                let path = args.get(i + 1).context("--config needs a value")?;
                parsed.config = Some(PathBuf::from(path));
                i += 1;
            }
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            path => {
                if parsed.input.is_some() {
                    bail!("Unexpected argument: {}", path);
                }
                parsed.input = Some(path.to_string());
            }
        }
        i += 1;
    }

    Ok(parsed)
}

fn recover(args: RecoverArgs) -> Result<()> {
    println!("{}", recover_secret(args)?);
    Ok(())
}

/// Resolve input, selection and radix from args over config, then reconstruct
fn recover_secret(args: RecoverArgs) -> Result<String> {
    let config = match &args.config {
        Some(path) => ZerothConfig::load_from(path)?,
        None => ZerothConfig::load()?,
    };

    let input = args.input.or(config.input.path);
    let selection: Selection = args
        .selection
        .as_deref()
        .unwrap_or(&config.selection.mode)
        .parse()?;
    let radix = args.radix.unwrap_or(config.output.radix);

    let document = match input.as_deref() {
        None | Some("-") => {
            log::debug!("Reading share set from stdin");
            ShareSetDocument::from_reader(io::stdin().lock())?
        }
        Some(path) => {
            log::debug!("Reading share set from {}", path);
            let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
            ShareSetDocument::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to load share set {}", path))?
        }
    };

    let secret = document.reconstruct(&selection)?;
    format_secret(&secret, radix)
}

fn decode_value(digits: &str, base: &str) -> Result<String> {
    let base: u32 = base
        .parse()
        .with_context(|| format!("Invalid base: {}", base))?;
    Ok(decode(digits, base)?.to_string())
}

/// Render a signed secret in `radix`
fn format_secret(secret: &BigInt, radix: u32) -> Result<String> {
    let digits = encode(secret.magnitude(), radix).context("Invalid output radix")?;
    Ok(match secret.sign() {
        Sign::Minus => format!("-{}", digits),
        _ => digits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zeroth_shareset::ShareSetError;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_recover_args() {
        let parsed =
            parse_recover_args(&strings(&["shares.json", "--select", "1,2,6", "--radix", "16"]))
                .unwrap();
        assert_eq!(
            parsed,
            RecoverArgs {
                input: Some("shares.json".into()),
                selection: Some("1,2,6".into()),
                radix: Some(16),
                config: None,
            }
        );

        assert_eq!(parse_recover_args(&[]).unwrap(), RecoverArgs::default());
    }

    #[test]
    fn test_parse_recover_args_errors() {
        assert!(parse_recover_args(&strings(&["--select"])).is_err());
        assert!(parse_recover_args(&strings(&["--radix", "hex"])).is_err());
        assert!(parse_recover_args(&strings(&["--verbose"])).is_err());
        assert!(parse_recover_args(&strings(&["a.json", "b.json"])).is_err());
    }

    #[test]
    fn test_format_secret() {
        assert_eq!(format_secret(&BigInt::from(3), 10).unwrap(), "3");
        assert_eq!(format_secret(&BigInt::from(255), 16).unwrap(), "ff");
        assert_eq!(format_secret(&BigInt::from(-5), 2).unwrap(), "-101");
        assert_eq!(format_secret(&BigInt::from(0), 36).unwrap(), "0");
        assert!(format_secret(&BigInt::from(1), 1).is_err());
    }

    // P(x) = 255 + x; shares 2 and 3 only, in mixed bases
    const SHARES: &str = r#"{
        "keys": { "n": 3, "k": 2 },
        "2": { "base": "16", "value": "101" },
        "3": { "base": "2", "value": "100000010" }
    }"#;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_recover_secret() {
        let shares = write_temp(SHARES);
        let config = write_temp(&format!(
            "[input]\npath = {:?}\n\n[selection]\nmode = \"available\"\n\n[output]\nradix = 2\n",
            shares.path().display().to_string()
        ));
        let config_path = Some(config.path().to_path_buf());

        // everything from the config file
        let args = RecoverArgs {
            config: config_path.clone(),
            ..Default::default()
        };
        assert_eq!(recover_secret(args).unwrap(), "11111111");

        // command-line values win over the config file
        let args = parse_recover_args(&strings(&[
            shares.path().to_str().unwrap(),
            "--select",
            "3,2",
            "--radix",
            "16",
        ]))
        .unwrap();
        let args = RecoverArgs {
            config: config_path.clone(),
            ..args
        };
        assert_eq!(recover_secret(args).unwrap(), "ff");

        // share 1 is absent, so the leading policy cannot be met
        let args = RecoverArgs {
            selection: Some("first".into()),
            config: config_path.clone(),
            ..Default::default()
        };
        let err = recover_secret(args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ShareSetError>(),
            Some(ShareSetError::MissingShare(1))
        ));

        let args = RecoverArgs {
            radix: Some(37),
            config: config_path,
            ..Default::default()
        };
        assert!(recover_secret(args).is_err());
    }

    #[test]
    fn test_decode_value() {
        assert_eq!(decode_value("213", "4").unwrap(), "39");
        assert_eq!(decode_value("111", "2").unwrap(), "7");
        assert!(decode_value("g", "10").is_err());
        assert!(decode_value("1", "ten").is_err());
    }
}
