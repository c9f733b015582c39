use std::io::{self, BufRead, Write};

use log::debug;

use crate::address::parse_address;
use crate::defaults::DeviceDefaults;
use crate::dhcp::ChangePlan;

/// Something the automation can report progress to and wait on.
pub trait Operator {
    /// Show a progress line.
    fn status(&mut self, message: &str) -> io::Result<()>;
    /// Block until the operator has logged in to the web UI by hand.
    fn wait_for_manual_login(&mut self) -> io::Result<()>;
}

/// Line-oriented terminal I/O.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write a line.
    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Print `prompt` without a newline and read one trimmed line.
    ///
    /// Returns `None` once input is exhausted.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        Ok(self.ask_verbatim(prompt)?.map(|line| line.trim().to_string()))
    }

    /// Like [`Console::ask`], but only the line terminator is removed.
    pub fn ask_verbatim(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Operator for Console<R, W> {
    fn status(&mut self, message: &str) -> io::Result<()> {
        self.say(message)
    }

    fn wait_for_manual_login(&mut self) -> io::Result<()> {
        self.ask("Press Enter after logging in...").map(drop)
    }
}

/// Ask for the current and new router address and confirm the change.
///
/// Returns `Ok(None)` when the run should stop without touching a browser:
/// an invalid address, a blank new address, anything but `y`/`Y` at the
/// confirmation, or end of input. The reason has already been printed.
pub fn collect_configuration<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    defaults: &DeviceDefaults,
) -> io::Result<Option<ChangePlan>> {
    let default_address = defaults.device.default_address;

    console.say("Huawei E3372 IP Address Changer")?;
    console.say(&"=".repeat(50))?;
    console.say("")?;

    let Some(current) =
        console.ask(&format!("Enter current device IP (default: {default_address}): "))?
    else {
        return Ok(None);
    };
    let current = if current.is_empty() {
        default_address
    } else {
        match parse_address(&current) {
            Ok(address) => address,
            Err(err) => {
                debug!("current address rejected: {err}");
                console.say("Invalid IP format!")?;
                return Ok(None);
            }
        }
    };

    console.say("")?;
    console.say("Examples of new IP: 192.168.18.1, 192.168.100.1, 10.0.0.1")?;
    let Some(new) = console.ask("Enter new device IP: ")? else {
        return Ok(None);
    };
    if new.is_empty() {
        console.say("New IP is required!")?;
        return Ok(None);
    }
    let new = match parse_address(&new) {
        Ok(address) => address,
        Err(err) => {
            debug!("new address rejected: {err}");
            console.say("Invalid IP format!")?;
            return Ok(None);
        }
    };

    let plan = ChangePlan::new(current, new, &defaults.dhcp);
    console.say("")?;
    console.say("Configuration Summary:")?;
    console.say(&format!("Current IP: {}", plan.current))?;
    console.say(&format!("New IP: {}", plan.new))?;
    console.say(&format!(
        "DHCP Range: {} - {}",
        plan.dhcp.range_start, plan.dhcp.range_end
    ))?;
    console.say(&format!("Subnet Mask: {}", plan.dhcp.netmask))?;
    console.say("")?;

    let confirmed = console
        .ask_verbatim("Proceed with these settings? (y/n): ")?
        .is_some_and(|answer| answer.eq_ignore_ascii_case("y"));
    if !confirmed {
        console.say("Cancelled.")?;
        return Ok(None);
    }

    Ok(Some(plan))
}
