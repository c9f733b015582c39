//! The interactive address change.
//!
//! 1. **Preflight** — unless `--manual-only`, check that a WebDriver server is
//!    listening for at least one selected backend; warn when none is
//! 2. **Collect** — prompt for the current and new address and confirm
//! 3. **Automate** — fail over across browser backends until the device
//!    accepts the settings, skipped when the preflight found no server
//! 4. **Fallback** — when automation failed, print the diagnostic and a
//!    script the operator can paste into the browser console

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::cli::Cli;
use e3372_ipchange::automation::Automation;
use e3372_ipchange::browser::WebDriverLauncher;
use e3372_ipchange::defaults::{DeviceDefaults, WebDriverEndpoints};
use e3372_ipchange::dhcp::ChangePlan;
use e3372_ipchange::preflight::require_webdriver;
use e3372_ipchange::prompt::{collect_configuration, Console};
use e3372_ipchange::report::{render_attempts, render_exhausted, render_manual_fallback};
use e3372_ipchange::script::manual_console_snippet;

pub fn run_change(cli: Cli) -> Result<ExitCode> {
    let defaults = DeviceDefaults::embedded().context("embedded device defaults are invalid")?;
    let backends = cli.backends();
    let endpoints = endpoints(&cli, &defaults.webdriver);

    let webdriver_ready = cli.manual_only
        || match require_webdriver(&backends, &endpoints, defaults.timing.preflight_timeout()) {
            Ok(reachable) => {
                debug!("reachable backends: {reachable:?}");
                true
            }
            Err(err) => {
                warn!("{err}");
                false
            }
        };

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    let Some(plan) = collect_configuration(&mut console, &defaults)
        .context("failed to read configuration from the terminal")?
    else {
        return Ok(ExitCode::SUCCESS);
    };

    if cli.manual_only {
        print_manual_fallback(&plan, &defaults)?;
        return Ok(ExitCode::SUCCESS);
    }

    if !webdriver_ready {
        println!();
        println!("{}", render_exhausted());
        print_manual_fallback(&plan, &defaults)?;
        return Ok(ExitCode::FAILURE);
    }

    console.say("")?;
    console.say("Starting browser automation...")?;

    let launcher = WebDriverLauncher::new(endpoints);
    let automation = Automation::new(
        &launcher,
        backends,
        &defaults.device,
        defaults.timing.timings(),
    );
    let report = automation
        .run(&plan, &mut console)
        .context("browser automation aborted")?;
    debug!("{}", render_attempts(&report));

    if report.is_success() {
        return Ok(ExitCode::SUCCESS);
    }

    println!();
    println!("{}", render_attempts(&report));
    println!();
    println!("{}", render_exhausted());
    println!();
    print_manual_fallback(&plan, &defaults)?;
    Ok(ExitCode::FAILURE)
}

fn endpoints(cli: &Cli, defaults: &WebDriverEndpoints) -> WebDriverEndpoints {
    WebDriverEndpoints {
        chrome: cli.chrome_url.clone().unwrap_or_else(|| defaults.chrome.clone()),
        firefox: cli.firefox_url.clone().unwrap_or_else(|| defaults.firefox.clone()),
        edge: cli.edge_url.clone().unwrap_or_else(|| defaults.edge.clone()),
    }
}

fn print_manual_fallback(plan: &ChangePlan, defaults: &DeviceDefaults) -> Result<()> {
    let snippet = manual_console_snippet(plan, &defaults.device)
        .context("failed to build the manual console script")?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout)?;
    writeln!(stdout, "{}", render_manual_fallback(plan, &snippet))?;
    Ok(())
}
