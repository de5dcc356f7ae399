//! Screen state and its terminal rendering.
//!
//! `Screen` is the last rendered state of the single screen: the quote labels,
//! the logo, the busy marker and an optional banner. Only the coordinator mutates
//! it; a [`View`] turns it into output.

use std::io::{self, Stdout, Write};

use chrono::{DateTime, Local, Utc};
use crossterm::style::Stylize;
use log::warn;
use shares_common::{Company, Quote, SharesError};
use strum::Display;

/// Placeholder shown while a label has no value.
pub const PLACEHOLDER: &str = "-";

/// Coloring of the change label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ChangeTone {
    /// Price went down; shown in red.
    Negative,
    /// Price went up; shown in green.
    Positive,
    /// No change, or nothing to show.
    #[default]
    Neutral,
}

impl ChangeTone {
    /// Tone for a change value. Zero and NaN are neutral.
    pub fn of(change: f64) -> Self {
        if change < 0.0 {
            ChangeTone::Negative
        } else if change > 0.0 {
            ChangeTone::Positive
        } else {
            ChangeTone::Neutral
        }
    }
}

/// Persistent message shown above the quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Banner {
    /// Connectivity to the API host is lost.
    #[strum(to_string = "No connection to the quotes server")]
    NetworkUnreachable,
    /// The last quote request failed.
    #[strum(to_string = "Quotes server error, select a company to try again")]
    ServerError,
}

impl Banner {
    /// Banner for a failed quote request.
    pub fn for_quote_error(error: &SharesError) -> Self {
        match error {
            SharesError::NetworkUnreachable => Banner::NetworkUnreachable,
            _ => Banner::ServerError,
        }
    }
}

/// What the logo slot shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogoView {
    /// Bundled placeholder image.
    #[default]
    Default,
    /// Logo loaded from the API.
    Remote(String),
}

/// Quote formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteView {
    pub company_name: String,
    pub symbol: String,
    pub price: String,
    pub change: String,
    pub tone: ChangeTone,
    pub updated_at: Option<String>,
}

/// Format a quote: two fraction digits for price and change, and the change tone.
pub fn render_quote(quote: &Quote) -> QuoteView {
    // -0.0 would otherwise print as "-0.00"
    let change = if quote.change == 0.0 { 0.0 } else { quote.change };

    QuoteView {
        company_name: quote.company_name.clone(),
        symbol: quote.symbol.trim().to_string(),
        price: format!("{:.2}", quote.price),
        change: format!("{:.2}", change),
        tone: ChangeTone::of(change),
        updated_at: quote
            .latest_update
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|ts| ts.with_timezone(&Local).format("%H:%M:%S").to_string()),
    }
}

/// Last rendered state of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub company_name: String,
    pub symbol: String,
    pub price: String,
    pub change: String,
    pub tone: ChangeTone,
    pub updated_at: Option<String>,
    pub logo: LogoView,
    pub busy: bool,
    pub banner: Option<Banner>,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            company_name: String::from(PLACEHOLDER),
            symbol: String::from(PLACEHOLDER),
            price: String::from(PLACEHOLDER),
            change: String::from(PLACEHOLDER),
            tone: ChangeTone::Neutral,
            updated_at: None,
            logo: LogoView::Default,
            busy: false,
            banner: None,
        }
    }
}

impl Screen {
    /// Blank the labels for a new selection and start the busy marker.
    ///
    /// A network banner survives the reset; a server banner does not.
    pub fn reset_for_request(&mut self) {
        let banner = self.banner.filter(|b| *b == Banner::NetworkUnreachable);
        *self = Screen {
            busy: true,
            banner,
            ..Screen::default()
        };
    }

    /// Fill the labels from a rendered quote.
    pub fn show_quote(&mut self, view: QuoteView) {
        self.company_name = view.company_name;
        self.symbol = view.symbol;
        self.price = view.price;
        self.change = view.change;
        self.tone = view.tone;
        self.updated_at = view.updated_at;
    }
}

/// Render target of the coordinator.
pub trait View {
    /// Show the selectable companies.
    fn show_directory(&mut self, companies: &[Company]);
    /// Show the current screen.
    fn draw(&mut self, screen: &Screen);
}

/// Terminal rendering with colored change values.
pub struct TerminalView<W: Write> {
    out: W,
}

impl TerminalView<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_directory(&mut self, companies: &[Company]) -> io::Result<()> {
        if companies.is_empty() {
            writeln!(self.out, "No companies to show.")?;
            return self.out.flush();
        }
        writeln!(self.out, "Companies:")?;
        for (row, company) in companies.iter().enumerate() {
            writeln!(self.out, "  {:>2}. {:<8} {}", row + 1, company.symbol.as_str(), company.name)?;
        }
        writeln!(self.out, "Type a number or a ticker; l = list, r = refresh, q = quit.")?;
        self.out.flush()
    }

    fn write_screen(&mut self, screen: &Screen) -> io::Result<()> {
        writeln!(self.out)?;
        if let Some(banner) = screen.banner {
            writeln!(self.out, "{}", format!(" ! {banner} ").white().on_red())?;
        }

        let name = if screen.busy {
            format!("{} (loading...)", screen.company_name)
        } else {
            screen.company_name.clone()
        };
        writeln!(self.out, "{}", name.bold())?;
        writeln!(self.out, "Symbol: {}", screen.symbol)?;
        writeln!(self.out, "Price:  {}", screen.price)?;
        let change = screen.change.as_str();
        match screen.tone {
            ChangeTone::Negative => writeln!(self.out, "Change: {}", change.red())?,
            ChangeTone::Positive => writeln!(self.out, "Change: {}", change.green())?,
            ChangeTone::Neutral => writeln!(self.out, "Change: {change}")?,
        }
        if let Some(updated_at) = &screen.updated_at {
            writeln!(self.out, "As of:  {updated_at}")?;
        }
        match &screen.logo {
            LogoView::Default => writeln!(self.out, "Logo:   [default]")?,
            LogoView::Remote(url) => writeln!(self.out, "Logo:   {url}")?,
        }
        self.out.flush()
    }
}

impl<W: Write> View for TerminalView<W> {
    fn show_directory(&mut self, companies: &[Company]) {
        if let Err(e) = self.write_directory(companies) {
            warn!("Failed to print directory: {}", e);
        }
    }

    fn draw(&mut self, screen: &Screen) {
        if let Err(e) = self.write_screen(screen) {
            warn!("Failed to draw screen: {}", e);
        }
    }
}
