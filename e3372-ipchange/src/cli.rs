use clap::{ArgAction, Parser, ValueEnum};
use e3372_ipchange::browser::BrowserKind;

#[derive(Parser, Debug)]
#[command(name = "e3372-ipchange")]
#[command(about = "Change the LAN IP address of a Huawei E3372 through a browser session")]
pub struct Cli {
    /// Browser backend to try; repeat to set the failover order.
    /// Defaults to chrome, firefox, edge.
    #[arg(long = "browser", value_enum)]
    pub browsers: Vec<BrowserArg>,
    /// chromedriver URL.
    #[arg(long)]
    pub chrome_url: Option<String>,
    /// geckodriver URL.
    #[arg(long)]
    pub firefox_url: Option<String>,
    /// msedgedriver URL.
    #[arg(long)]
    pub edge_url: Option<String>,
    /// Skip browser automation and print the browser-console script instead.
    #[arg(long)]
    pub manual_only: bool,
    /// Log more detail to stderr (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum BrowserArg {
    Chrome,
    Firefox,
    Edge,
}

impl From<BrowserArg> for BrowserKind {
    fn from(arg: BrowserArg) -> Self {
        match arg {
            BrowserArg::Chrome => BrowserKind::Chrome,
            BrowserArg::Firefox => BrowserKind::Firefox,
            BrowserArg::Edge => BrowserKind::Edge,
        }
    }
}

impl Cli {
    /// Backends in failover order, without repeats.
    pub fn backends(&self) -> Vec<BrowserKind> {
        if self.browsers.is_empty() {
            return BrowserKind::DEFAULT_ORDER.to_vec();
        }
        let mut order: Vec<BrowserKind> = Vec::new();
        for kind in self.browsers.iter().copied().map(BrowserKind::from) {
            if !order.contains(&kind) {
                order.push(kind);
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use e3372_ipchange::browser::BrowserKind;

    #[test]
    fn default_order_is_chrome_firefox_edge() {
        let cli = Cli::parse_from(["e3372-ipchange"]);
        assert_eq!(cli.backends(), BrowserKind::DEFAULT_ORDER.to_vec());
        assert!(!cli.manual_only);
    }

    #[test]
    fn repeated_browser_flags_set_order_once() {
        let cli = Cli::parse_from([
            "e3372-ipchange",
            "--browser",
            "edge",
            "--browser",
            "chrome",
            "--browser",
            "edge",
        ]);
        assert_eq!(cli.backends(), vec![BrowserKind::Edge, BrowserKind::Chrome]);
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::parse_from(["e3372-ipchange", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }
}
