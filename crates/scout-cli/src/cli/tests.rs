use super::*;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_scan() {
    match parse(&["scout", "scan", "page.html", "--page-url", "https://x.com/watch"]) {
        CliCommand::Scan {
            path,
            page_url,
            batch,
        } => {
            assert_eq!(path, PathBuf::from("page.html"));
            assert_eq!(page_url, "https://x.com/watch");
            assert!(!batch);
        }
        _ => panic!("expected Scan"),
    }
}

#[test]
fn cli_parse_scan_batch() {
    match parse(&["scout", "scan", "p.html", "--page-url", "x.com", "--batch"]) {
        CliCommand::Scan { batch, .. } => assert!(batch),
        _ => panic!("expected Scan with batch"),
    }
}

#[test]
fn cli_scan_requires_page_url() {
    assert!(Cli::try_parse_from(["scout", "scan", "page.html"]).is_err());
}

#[test]
fn cli_parse_import_har() {
    match parse(&["scout", "import-har", "capture.har"]) {
        CliCommand::ImportHar { path, page_url } => {
            assert_eq!(path, PathBuf::from("capture.har"));
            assert!(page_url.is_none());
        }
        _ => panic!("expected ImportHar"),
    }
}

#[test]
fn cli_parse_import_har_page_override() {
    match parse(&["scout", "import-har", "c.har", "--page-url", "https://x.com/"]) {
        CliCommand::ImportHar { page_url, .. } => {
            assert_eq!(page_url.as_deref(), Some("https://x.com/"))
        }
        _ => panic!("expected ImportHar"),
    }
}

#[test]
fn cli_parse_blocked() {
    match parse(&["scout", "blocked", "cdn.ads.net"]) {
        CliCommand::Blocked { target } => assert_eq!(target, "cdn.ads.net"),
        _ => panic!("expected Blocked"),
    }
}

#[test]
fn cli_parse_adblock() {
    match parse(&["scout", "adblock", "off"]) {
        CliCommand::Adblock { action } => assert_eq!(action, AdblockAction::Off),
        _ => panic!("expected Adblock"),
    }
    match parse(&["scout", "adblock"]) {
        CliCommand::Adblock { action } => assert_eq!(action, AdblockAction::Status),
        _ => panic!("expected Adblock status"),
    }
    assert!(Cli::try_parse_from(["scout", "adblock", "maybe"]).is_err());
}
