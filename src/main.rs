// SPDX-License-Identifier: MIT
//
// wintui: a watchlist browser built on the wintui window toolkit.
//
// This binary wires the two crates together:
//
//   wintui-term → terminal control, rendering, key parsing, event loop
//   wintui-core → window tree, layout, colour, focus and dispatch
//
// Everything on screen is a window in one menu. Behaviour lives in hook
// functions attached to those windows; state lives in window payloads:
//
//   stocks column → Watchlist (search input + list of item windows)
//   stock column  → Chart (selected series, chart cursor, chart style)
//   item windows  → Series (the sample data for one symbol)
//
// Layout:
//
//   ┌──────────────┐ ┌────────────────────────────────────┐
//   │ list         │ │ chart (grid)                       │
//   │  SEK=X  10.4 │ │                                    │
//   │  ^OMX  2461. │ └────────────────────────────────────┘
//   │  ...         │   value under the chart cursor
//   └──────────────┘ ┌──────────── data ──────────────────┐
//   ┌──────────────┐ │ Symbol : ...        Volume : ...   │
//   │ search       │ │ Name   : ...        Open   : ...   │
//   └──────────────┘ └────────────────────────────────────┘
//
// Keys: Up/Down pick a symbol, typing edits the search, Enter opens the
// chart, Tab/Shift-Tab move focus, Ctrl-C quits. In the chart, Left/Right
// move the cursor, Space switches line/candles and d/w/m/y/x zoom.

use std::env;
use std::fs::File;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use wintui_core::{
    Align, Axis, Border, Color, ColorPair, ContainerConfig, GridCell, GridConfig, Hooks, Input,
    KeyCode, KeyEvent, List, MenuConfig, Modifiers, Parent, Pos, Rect, Size, TextConfig, Tui,
    TuiConfig, WindowConfig, WindowHook, WindowId,
};

const DEFAULT_FILTER: &str = "wintui=info,wintui_core=info";

/// Longest search string.
const SEARCH_CAPACITY: usize = 100;

/// Trading days of generated history per symbol.
const HISTORY: usize = 3 * 252;

/// Bars shown when zoomed all the way out.
const MAX_BARS: usize = 60;

const USAGE: &str = "\
usage: wintui [--log <path>]

  --log <path>   write a trace log to <path> (also: WINTUI_LOG)
  -h, --help     show this help

RUST_LOG filters the log, default \"wintui=info,wintui_core=info\".";

// ─── Sample data ────────────────────────────────────────────────────────────

/// Symbols on the watchlist, with the price their history starts from.
const WATCHLIST: [Listing; 9] = [
    Listing::new("SEK=X", "USD/SEK", "CCY", "SEK", 10.4),
    Listing::new("^OMX", "OMX Stockholm 30", "STO", "SEK", 2_400.0),
    Listing::new("NVDA", "NVIDIA Corporation", "NMS", "USD", 120.0),
    Listing::new("SAAB-B.ST", "Saab AB", "STO", "SEK", 230.0),
    Listing::new("AAPL", "Apple Inc.", "NMS", "USD", 190.0),
    Listing::new("TSLA", "Tesla, Inc.", "NMS", "USD", 250.0),
    Listing::new("SPGI", "S&P Global Inc.", "NYQ", "USD", 480.0),
    Listing::new("BLK", "BlackRock, Inc.", "NYQ", "USD", 890.0),
    Listing::new("VFIAX", "Vanguard 500 Index Admiral", "NAS", "USD", 500.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Listing {
    symbol: &'static str,
    name: &'static str,
    exchange: &'static str,
    currency: &'static str,
    start: f64,
}

impl Listing {
    const fn new(
        symbol: &'static str,
        name: &'static str,
        exchange: &'static str,
        currency: &'static str,
        start: f64,
    ) -> Self {
        Self {
            symbol,
            name,
            exchange,
            currency,
            start,
        }
    }
}

/// One bar: a day, or a bucket of days when zoomed out.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    /// Trading day the bar starts on, counted from the start of history.
    day: usize,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

/// Bar width of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interval {
    Day,
    Week,
    Month,
    Year,
    /// The whole history in at most [`MAX_BARS`] bars.
    Max,
}

impl Interval {
    const fn from_key(ch: char) -> Option<Self> {
        match ch {
            'd' => Some(Self::Day),
            'w' => Some(Self::Week),
            'm' => Some(Self::Month),
            'y' => Some(Self::Year),
            'x' => Some(Self::Max),
            _ => None,
        }
    }

    /// Trading days per bar for a history of `total` days.
    const fn days(self, total: usize) -> usize {
        match self {
            Self::Day => 1,
            Self::Week => 5,
            Self::Month => 21,
            Self::Year => 252,
            Self::Max => {
                let days = total.div_ceil(MAX_BARS);
                if days == 0 { 1 } else { days }
            }
        }
    }
}

/// Price history for one symbol, generated from a seeded random walk so
/// the demo runs offline and the same symbol always looks the same.
#[derive(Debug, Clone, PartialEq)]
struct Series {
    listing: Listing,
    daily: Vec<Sample>,
    interval: Interval,
    bars: Vec<Sample>,
}

impl Series {
    /// Look up a watchlist symbol, ignoring case.
    fn lookup(symbol: &str) -> Option<Self> {
        let symbol = symbol.trim();
        WATCHLIST
            .iter()
            .find(|l| l.symbol.eq_ignore_ascii_case(symbol))
            .map(|&listing| Self::generate(listing))
    }

    fn generate(listing: Listing) -> Self {
        let mut walk = Walk::seeded(listing.symbol);
        let mut price = listing.start;
        let daily: Vec<Sample> = (0..HISTORY)
            .map(|day| {
                let open = price;
                let close = (open * (1.0 + (walk.unit() - 0.5) * 0.04)).max(0.01);
                let high = open.max(close) * (1.0 + walk.unit() * 0.01);
                let low = open.min(close) * (1.0 - walk.unit() * 0.01);
                price = close;
                Sample {
                    day,
                    open,
                    high,
                    low,
                    close,
                    volume: walk.volume(),
                }
            })
            .collect();
        let bars = daily.clone();
        Self {
            listing,
            daily,
            interval: Interval::Day,
            bars,
        }
    }

    fn zoom(&mut self, interval: Interval) {
        self.interval = interval;
        self.bars = resample(&self.daily, interval.days(self.daily.len()));
        debug!(symbol = self.listing.symbol, ?interval, bars = self.bars.len(), "zoom");
    }

    fn bars(&self) -> &[Sample] {
        &self.bars
    }

    /// The most recent `count` bars.
    fn tail(&self, count: usize) -> &[Sample] {
        &self.bars[self.bars.len().saturating_sub(count)..]
    }

    fn last_day(&self) -> Option<Sample> {
        self.daily.last().copied()
    }
}

/// Merge consecutive runs of `days` samples into one bar each.
fn resample(daily: &[Sample], days: usize) -> Vec<Sample> {
    daily
        .chunks(days.max(1))
        .filter_map(|chunk| {
            let (first, last) = (chunk.first()?, chunk.last()?);
            Some(Sample {
                day: first.day,
                open: first.open,
                high: chunk.iter().map(|s| s.high).fold(f64::MIN, f64::max),
                low: chunk.iter().map(|s| s.low).fold(f64::MAX, f64::min),
                close: last.close,
                volume: chunk.iter().map(|s| s.volume).sum(),
            })
        })
        .collect()
}

/// Random walk seeded from a hash of the symbol.
struct Walk(StdRng);

impl Walk {
    fn seeded(symbol: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        symbol.hash(&mut hasher);
        Self(StdRng::seed_from_u64(hasher.finish()))
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }

    fn volume(&mut self) -> u64 {
        self.0.gen_range(100_000..1_000_000)
    }
}

// ─── Payloads ───────────────────────────────────────────────────────────────

/// State of the stocks column: the search input and the selectable list
/// of item windows (the search box is the last entry).
#[derive(Debug)]
struct Watchlist {
    input: Input,
    list: List,
}

impl Watchlist {
    fn new() -> Self {
        Self {
            input: Input::new(SEARCH_CAPACITY),
            list: List::new(Axis::Vertical),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Style {
    #[default]
    Line,
    Candles,
}

impl Style {
    const fn toggled(self) -> Self {
        match self {
            Self::Line => Self::Candles,
            Self::Candles => Self::Line,
        }
    }

    fn render_hook(self) -> WindowHook {
        match self {
            Self::Line => line_render,
            Self::Candles => candle_render,
        }
    }
}

/// State of the stock column, shared by the chart, value and data
/// windows under it.
#[derive(Debug, Default)]
struct Chart {
    series: Option<Series>,
    /// Cursor position in bars back from the most recent one.
    index: usize,
    style: Style,
    grid: Option<WindowId>,
}

impl Chart {
    fn show(&mut self, series: Series) {
        info!(symbol = series.listing.symbol, "showing chart");
        self.series = Some(series);
        self.index = 0;
    }

    fn cursor_sample(&self) -> Option<Sample> {
        let bars = self.series.as_ref()?.bars();
        bars.len()
            .checked_sub(self.index + 1)
            .and_then(|i| bars.get(i))
            .copied()
    }

    fn cursor_label(&self) -> String {
        self.cursor_sample().map_or_else(
            || "(none, none)".to_owned(),
            |s| format!("(day {}, {:.2})", s.day, s.close),
        )
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Log a failed toolkit call from inside a hook, where there is no caller
/// to hand the error to.
fn report<T>(result: wintui_core::Result<T>, what: &str) -> Option<T> {
    result.map_err(|err| warn!(%err, "{what}")).ok()
}

fn named(name: &str) -> WindowConfig {
    WindowConfig {
        name: name.to_owned(),
        ..WindowConfig::default()
    }
}

/// Nearest ancestor called `name`.
fn ancestor(tui: &Tui, from: WindowId, name: &str) -> Option<WindowId> {
    let mut current = from;
    loop {
        match tui.parent(current)? {
            Parent::Window(p) if tui.name(p) == Some(name) => return Some(p),
            Parent::Window(p) => current = p,
            Parent::Menu(_) | Parent::Root => return None,
        }
    }
}

fn activate(tui: &mut Tui, id: WindowId) {
    report(tui.set_active_window(id), "focus window");
}

// ─── Layout construction ────────────────────────────────────────────────────

/// Build the watchlist in `tui` and show it.
///
/// # Errors
///
/// Fails if the menu or its root container cannot be created.
fn build(tui: &mut Tui) -> wintui_core::Result<()> {
    let menu = tui.create_menu(MenuConfig {
        name: "main".into(),
        ..MenuConfig::default()
    });
    tui.create_container(
        menu,
        ContainerConfig {
            window: WindowConfig {
                name: "root".into(),
                rect: Some(Rect::FILL),
                hooks: Hooks {
                    init: Some(root_init),
                    enter: Some(enter_first_child),
                    ..Hooks::default()
                },
                ..WindowConfig::default()
            },
            padding: true,
            align: Align::Center,
            pos: Pos::Center,
            ..ContainerConfig::default()
        },
    )?;
    tui.set_active_menu(menu)
}

fn enter_first_child(tui: &mut Tui, id: WindowId) {
    if let Some(&first) = tui.children(id).first() {
        activate(tui, first);
    }
}

fn root_init(tui: &mut Tui, root: WindowId) {
    debug!("building watchlist");
    report(
        tui.create_container(
            root,
            ContainerConfig {
                window: WindowConfig {
                    name: "stocks".into(),
                    grow_h: true,
                    hooks: Hooks {
                        init: Some(stocks_init),
                        enter: Some(stocks_enter),
                        key: Some(stocks_key),
                        ..Hooks::default()
                    },
                    payload: Some(Box::new(Watchlist::new())),
                    ..WindowConfig::default()
                },
                axis: Axis::Vertical,
                ..ContainerConfig::default()
            },
        ),
        "create stocks column",
    );
    report(
        tui.create_container(
            root,
            ContainerConfig {
                window: WindowConfig {
                    name: "stock".into(),
                    grow_w: true,
                    grow_h: true,
                    hooks: Hooks {
                        init: Some(stock_init),
                        ..Hooks::default()
                    },
                    payload: Some(Box::new(Chart::default())),
                    ..WindowConfig::default()
                },
                axis: Axis::Vertical,
                ..ContainerConfig::default()
            },
        ),
        "create stock column",
    );
}

// ─── Stocks column ──────────────────────────────────────────────────────────

fn stocks_init(tui: &mut Tui, stocks: WindowId) {
    report(
        tui.create_container(
            stocks,
            ContainerConfig {
                window: WindowConfig {
                    grow_h: true,
                    hooks: Hooks {
                        init: Some(list_init),
                        ..Hooks::default()
                    },
                    ..named("list")
                },
                axis: Axis::Vertical,
                border: Border::colored(ColorPair::fg(Color::White)),
                ..ContainerConfig::default()
            },
        ),
        "create list",
    );
    let search = report(
        tui.create_container(
            stocks,
            ContainerConfig {
                window: WindowConfig {
                    grow_w: true,
                    hooks: Hooks {
                        init: Some(search_init),
                        enter: Some(search_enter),
                        exit: Some(search_exit),
                        update: Some(search_update),
                        render: Some(search_render),
                        key: Some(search_key),
                        ..Hooks::default()
                    },
                    ..named("search")
                },
                border: Border::colored(ColorPair::fg(Color::White)),
                ..ContainerConfig::default()
            },
        ),
        "create search",
    );
    if let Some(search) = search {
        tui.with_payload(stocks, |_, w: &mut Watchlist| w.list.push(search));
    }
}

fn stocks_enter(tui: &mut Tui, stocks: WindowId) {
    let current = tui.payload::<Watchlist>(stocks).and_then(|w| w.list.current());
    if let Some(current) = current {
        activate(tui, current);
    }
}

/// Typing goes to the search box from anywhere in the column; arrows move
/// through the list.
fn stocks_key(tui: &mut Tui, stocks: WindowId, key: KeyEvent) -> bool {
    let Some((edited, moved_to)) = tui.with_payload(stocks, |_, w: &mut Watchlist| {
        if w.input.handle_key(key) {
            return (true, None);
        }
        let moved = w.list.handle_key(key);
        (false, if moved { w.list.current() } else { None })
    }) else {
        return false;
    };

    if edited {
        if let Some(search) = tui.find(stocks, "search") {
            if tui.active_window() != Some(search) {
                activate(tui, search);
            }
        }
        return true;
    }
    if let Some(item) = moved_to {
        activate(tui, item);
        return true;
    }
    false
}

fn list_init(tui: &mut Tui, list: WindowId) {
    let Some(stocks) = ancestor(tui, list, "stocks") else {
        return;
    };
    for listing in &WATCHLIST {
        let item = report(
            tui.create_container(
                list,
                ContainerConfig {
                    window: WindowConfig {
                        grow_w: true,
                        hooks: Hooks {
                            init: Some(item_init),
                            enter: Some(item_enter),
                            exit: Some(item_exit),
                            update: Some(item_update),
                            key: Some(item_key),
                            ..Hooks::default()
                        },
                        payload: Some(Box::new(Series::generate(*listing))),
                        ..named(listing.symbol)
                    },
                    border: Border::colored(ColorPair::fg(Color::Black)),
                    align: Align::Between,
                    ..ContainerConfig::default()
                },
            ),
            "create list item",
        );
        if let Some(item) = item {
            tui.with_payload(stocks, |_, w: &mut Watchlist| w.list.push(item));
        }
    }
}

fn item_init(tui: &mut Tui, item: WindowId) {
    report(
        tui.create_text(
            item,
            TextConfig {
                window: named("symbol"),
                align: Align::Start,
                ..TextConfig::default()
            },
        ),
        "create symbol text",
    );
    report(
        tui.create_text(
            item,
            TextConfig {
                window: named("value"),
                align: Align::End,
                ..TextConfig::default()
            },
        ),
        "create value text",
    );
}

fn item_update(tui: &mut Tui, item: WindowId) {
    let Some(last) = tui.payload::<Series>(item).and_then(Series::last_day) else {
        return;
    };
    let symbol = tui.name(item).unwrap_or_default().to_owned();
    let color = if last.close > last.open {
        Color::Green
    } else {
        Color::Red
    };

    if let Some(text) = tui.find(item, "symbol") {
        report(tui.set_text(text, format!("{symbol}    ")), "set symbol");
    }
    if let Some(text) = tui.find(item, "value") {
        report(tui.set_text(text, format!("{:.2}", last.close)), "set value");
        report(tui.set_color(text, ColorPair::fg(color)), "colour value");
    }
}

fn item_enter(tui: &mut Tui, item: WindowId) {
    report(
        tui.set_border_color(item, ColorPair::fg(Color::Yellow)),
        "highlight item",
    );
    if let Some(stocks) = tui.find(item, ". .") {
        tui.with_payload(stocks, |_, w: &mut Watchlist| w.list.select_item(item));
    }
}

fn item_exit(tui: &mut Tui, item: WindowId) {
    report(
        tui.set_border_color(item, ColorPair::fg(Color::Black)),
        "unhighlight item",
    );
}

/// Enter opens the item's series in the chart.
fn item_key(tui: &mut Tui, item: WindowId, key: KeyEvent) -> bool {
    if key != KeyEvent::plain(KeyCode::Enter) {
        return false;
    }
    let Some(stock) = tui.find(item, ". . . stock") else {
        return false;
    };
    let Some(series) = tui.payload::<Series>(item).cloned() else {
        return false;
    };
    let grid = tui.with_payload(stock, |_, chart: &mut Chart| {
        chart.show(series);
        chart.grid
    });
    open_chart(tui, stock, grid.flatten())
}

/// Focus the chart and refresh the data panel.
fn open_chart(tui: &mut Tui, stock: WindowId, grid: Option<WindowId>) -> bool {
    let Some(grid) = grid else {
        return false;
    };
    activate(tui, grid);
    fill_data(tui, stock);
    true
}

fn search_init(tui: &mut Tui, search: WindowId) {
    report(
        tui.create_text(
            search,
            TextConfig {
                window: named("text"),
                ..TextConfig::default()
            },
        ),
        "create search text",
    );
}

fn search_enter(tui: &mut Tui, search: WindowId) {
    report(
        tui.set_color(search, ColorPair::bg(Color::Red)),
        "highlight search",
    );
}

fn search_exit(tui: &mut Tui, search: WindowId) {
    report(
        tui.set_color(search, ColorPair::bg(Color::Black)),
        "unhighlight search",
    );
}

fn search_update(tui: &mut Tui, search: WindowId) {
    let Some(stocks) = ancestor(tui, search, "stocks") else {
        return;
    };
    let Some(display) = tui
        .payload::<Watchlist>(stocks)
        .map(|w| w.input.display().to_owned())
    else {
        return;
    };
    if let Some(text) = tui.find(search, "text") {
        report(tui.set_text(text, display), "set search text");
    }
}

/// The edit position belongs to the search box as a whole, so the cursor
/// shows while the box is focused rather than only its text pane.
fn search_render(tui: &mut Tui, search: WindowId) {
    if tui.active_window() != Some(search) {
        return;
    }
    let Some(rect) = tui.find(search, "text").and_then(|text| tui.rect(text)) else {
        return;
    };
    let Some(offset) = ancestor(tui, search, "stocks")
        .and_then(|stocks| tui.payload::<Watchlist>(stocks))
        .map(|w| w.input.cursor().saturating_sub(w.input.scroll()))
    else {
        return;
    };
    let offset = i32::try_from(offset).unwrap_or(i32::MAX);
    tui.set_cursor(rect.x.saturating_add(offset), rect.y);
}

/// Enter looks the typed symbol up and charts it.
fn search_key(tui: &mut Tui, search: WindowId, key: KeyEvent) -> bool {
    if key != KeyEvent::plain(KeyCode::Enter) {
        return false;
    }
    let Some(stock) = tui.find(search, ". . stock") else {
        return false;
    };
    let symbol = ancestor(tui, search, "stocks")
        .and_then(|stocks| tui.payload::<Watchlist>(stocks))
        .map(|w| w.input.value())
        .unwrap_or_default();
    let found = Series::lookup(&symbol);
    info!(%symbol, found = found.is_some(), "search");

    let grid = tui.with_payload(stock, |_, chart: &mut Chart| {
        if let Some(series) = found {
            chart.show(series);
        }
        chart.series.as_ref().and(chart.grid)
    });
    open_chart(tui, stock, grid.flatten());
    true
}

// ─── Stock column ───────────────────────────────────────────────────────────

fn stock_init(tui: &mut Tui, stock: WindowId) {
    let frame = report(
        tui.create_container(
            stock,
            ContainerConfig {
                window: WindowConfig {
                    grow_w: true,
                    grow_h: true,
                    ..WindowConfig::default()
                },
                border: Border::colored(ColorPair::fg(Color::White)),
                ..ContainerConfig::default()
            },
        ),
        "create chart frame",
    );
    let grid = frame.and_then(|frame| {
        report(
            tui.create_grid(
                frame,
                GridConfig {
                    window: WindowConfig {
                        grow_w: true,
                        grow_h: true,
                        color: ColorPair::bg(Color::Black),
                        hooks: Hooks {
                            render: Some(Style::Line.render_hook()),
                            key: Some(chart_key),
                            ..Hooks::default()
                        },
                        ..named("chart")
                    },
                    size: Size::new(20, 10),
                },
            ),
            "create chart",
        )
    });
    tui.with_payload(stock, |_, chart: &mut Chart| chart.grid = grid);

    report(
        tui.create_text(
            stock,
            TextConfig {
                window: WindowConfig {
                    grow_w: true,
                    color: ColorPair::bg(Color::Yellow),
                    hooks: Hooks {
                        update: Some(value_update),
                        ..Hooks::default()
                    },
                    ..named("value")
                },
                align: Align::Center,
                ..TextConfig::default()
            },
        ),
        "create value",
    );
    report(
        tui.create_container(
            stock,
            ContainerConfig {
                window: WindowConfig {
                    grow_w: true,
                    color: ColorPair::new(Color::White, Color::Black),
                    hooks: Hooks {
                        init: Some(data_init),
                        ..Hooks::default()
                    },
                    ..named("data")
                },
                border: Border::plain(),
                padding: true,
                align: Align::Center,
                ..ContainerConfig::default()
            },
        ),
        "create data panel",
    );
}

fn value_update(tui: &mut Tui, value: WindowId) {
    let Some(stock) = ancestor(tui, value, "stock") else {
        return;
    };
    let label = tui
        .payload::<Chart>(stock)
        .map_or_else(|| "(none, none)".to_owned(), Chart::cursor_label);
    report(tui.set_text(value, label), "set cursor value");
}

const DATA1: [(&str, &str); 4] = [
    ("Symbol   : ", "symbol"),
    ("Name     : ", "name"),
    ("Exchange : ", "exchange"),
    ("Currency : ", "currency"),
];

const DATA2: [(&str, &str); 4] = [
    ("Volume : ", "volume"),
    ("Open   : ", "open"),
    ("High   : ", "high"),
    ("Low    : ", "low"),
];

fn data_init(tui: &mut Tui, data: WindowId) {
    let blocks: [(&str, WindowHook); 2] = [("data1", data1_init), ("data2", data2_init)];
    for (name, init) in blocks {
        report(
            tui.create_container(
                data,
                ContainerConfig {
                    window: WindowConfig {
                        hooks: Hooks {
                            init: Some(init),
                            ..Hooks::default()
                        },
                        ..named(name)
                    },
                    pos: Pos::Center,
                    ..ContainerConfig::default()
                },
            ),
            "create data block",
        );
    }
}

fn data1_init(tui: &mut Tui, block: WindowId) {
    data_rows(tui, block, &DATA1);
}

fn data2_init(tui: &mut Tui, block: WindowId) {
    data_rows(tui, block, &DATA2);
}

/// A right-aligned label column next to a column of named values.
fn data_rows(tui: &mut Tui, block: WindowId, rows: &[(&str, &str)]) {
    let labels = report(
        tui.create_container(
            block,
            ContainerConfig {
                axis: Axis::Vertical,
                pos: Pos::End,
                ..ContainerConfig::default()
            },
        ),
        "create label column",
    );
    let values = report(
        tui.create_container(
            block,
            ContainerConfig {
                window: named("values"),
                axis: Axis::Vertical,
                pos: Pos::Start,
                ..ContainerConfig::default()
            },
        ),
        "create value column",
    );
    let (Some(labels), Some(values)) = (labels, values) else {
        return;
    };
    for &(label, name) in rows {
        report(
            tui.create_text(
                labels,
                TextConfig {
                    string: label.to_owned(),
                    ..TextConfig::default()
                },
            ),
            "create label",
        );
        report(
            tui.create_text(
                values,
                TextConfig {
                    window: named(name),
                    string: "none".to_owned(),
                    ..TextConfig::default()
                },
            ),
            "create value",
        );
    }
}

/// Copy the charted series into the data panel.
fn fill_data(tui: &mut Tui, stock: WindowId) {
    let Some(data) = tui.find(stock, "data") else {
        return;
    };
    let Some(series) = tui.payload::<Chart>(stock).and_then(|c| c.series.as_ref()) else {
        return;
    };
    let listing = series.listing;
    let bars = series.bars();
    let open = bars.first().map_or(0.0, |s| s.open);
    let high = bars.iter().map(|s| s.high).fold(f64::MIN, f64::max);
    let low = bars.iter().map(|s| s.low).fold(f64::MAX, f64::min);
    let volume = series.last_day().map_or(0, |s| s.volume);

    let fields = [
        ("data1 values symbol", listing.symbol.to_owned()),
        ("data1 values name", listing.name.to_owned()),
        ("data1 values exchange", listing.exchange.to_owned()),
        ("data1 values currency", listing.currency.to_owned()),
        ("data2 values volume", volume.to_string()),
        ("data2 values open", format!("{open:.2}")),
        ("data2 values high", format!("{high:.2}")),
        ("data2 values low", format!("{low:.2}")),
    ];
    for (path, value) in fields {
        if let Some(text) = tui.find(data, path) {
            report(tui.set_text(text, value), "fill data");
        }
    }
}

// ─── Chart ──────────────────────────────────────────────────────────────────

/// Maps prices to grid rows, the highest price on row 0.
#[derive(Debug, Clone, Copy)]
struct Scale {
    low: f64,
    high: f64,
    rows: i32,
}

impl Scale {
    fn of(bars: &[Sample], rows: i32) -> Self {
        let low = bars.iter().map(|s| s.low).fold(f64::MAX, f64::min);
        let high = bars.iter().map(|s| s.high).fold(f64::MIN, f64::max);
        Self { low, high, rows }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn y(self, price: f64) -> i32 {
        let span = self.high - self.low;
        if self.rows <= 1 || span <= f64::EPSILON {
            return (self.rows - 1).max(0) / 2;
        }
        let t = ((self.high - price) / span).clamp(0.0, 1.0);
        (t * f64::from(self.rows - 1)).round() as i32
    }
}

fn line_render(tui: &mut Tui, grid: WindowId) {
    draw_chart(tui, grid, Style::Line);
}

fn candle_render(tui: &mut Tui, grid: WindowId) {
    draw_chart(tui, grid, Style::Candles);
}

/// Redraw the chart grid at its laid-out size. Bars are two columns
/// apart, newest at the right edge.
fn draw_chart(tui: &mut Tui, grid: WindowId, style: Style) {
    let Some(stock) = ancestor(tui, grid, "stock") else {
        return;
    };
    let Some(rect) = tui.rect(grid) else {
        return;
    };
    let active = tui.active_window() == Some(grid);

    tui.with_payload(stock, |tui, chart: &mut Chart| {
        let cleared = tui
            .grid_resize(grid, rect.size())
            .and_then(|()| tui.grid_clear(grid));
        if report(cleared, "reset chart").is_none() {
            return;
        }
        let Some(series) = &chart.series else {
            return;
        };
        let count = usize::try_from(rect.w / 2).unwrap_or(0);
        let bars = series.tail(count);
        if bars.is_empty() {
            return;
        }
        chart.index = chart.index.min(bars.len() - 1);
        let scale = Scale::of(bars, rect.h);
        match style {
            Style::Line => plot_line(tui, grid, bars, scale, rect.w),
            Style::Candles => plot_candles(tui, grid, bars, scale, rect.w),
        }
        if active {
            plot_cursor(tui, grid, bars, scale, rect, chart.index);
        }
    });
}

fn fill(tui: &mut Tui, grid: WindowId, x: i32, y: i32, cell: GridCell) {
    // Off-grid points are dropped.
    let _ = tui.grid_set(grid, x, y, cell);
}

/// Bar `back` steps from the newest, and its column.
fn bar_at(bars: &[Sample], back: usize, width: i32) -> Option<(Sample, i32)> {
    let sample = *bars.get(bars.len().checked_sub(back + 1)?)?;
    let x = width - 1 - i32::try_from(back * 2).ok()?;
    Some((sample, x))
}

fn plot_line(tui: &mut Tui, grid: WindowId, bars: &[Sample], scale: Scale, width: i32) {
    let (Some(first), Some(last)) = (bars.first(), bars.last()) else {
        return;
    };
    let color = if first.close > last.close {
        Color::Red
    } else {
        Color::Green
    };
    let dot = GridCell::new(' ', ColorPair::bg(color));

    for back in 0..bars.len() {
        let Some((sample, x)) = bar_at(bars, back, width) else {
            break;
        };
        let y = scale.y(sample.close);
        fill(tui, grid, x, y, dot);

        // Join to the previous bar in the gap column.
        let Some((prev, _)) = bar_at(bars, back + 1, width) else {
            break;
        };
        let prev_y = scale.y(prev.close);
        if (prev_y - y).abs() <= 1 {
            fill(tui, grid, x - 1, y, dot);
        } else {
            for row in y.min(prev_y)..y.max(prev_y) {
                fill(tui, grid, x - 1, row, dot);
            }
        }
    }
}

fn plot_candles(tui: &mut Tui, grid: WindowId, bars: &[Sample], scale: Scale, width: i32) {
    for back in 0..bars.len() {
        let Some((sample, x)) = bar_at(bars, back, width) else {
            break;
        };
        let color = if sample.close > sample.open {
            Color::Green
        } else {
            Color::Red
        };
        let (open, close) = (scale.y(sample.open), scale.y(sample.close));
        let (top, bottom) = (open.min(close), open.max(close));
        let wick = GridCell::new('|', ColorPair::fg(color));

        for y in scale.y(sample.high)..top {
            fill(tui, grid, x, y, wick);
        }
        for y in bottom + 1..=scale.y(sample.low) {
            fill(tui, grid, x, y, wick);
        }
        for y in top..=bottom {
            fill(tui, grid, x, y, GridCell::new(' ', ColorPair::bg(color)));
        }
    }
}

/// Crosshair through the cursor bar's close; the terminal cursor sits at
/// the crossing.
fn plot_cursor(
    tui: &mut Tui,
    grid: WindowId,
    bars: &[Sample],
    scale: Scale,
    rect: Rect,
    index: usize,
) {
    let Some((sample, x)) = bar_at(bars, index, rect.w) else {
        return;
    };
    let (x, y) = (x.max(0), scale.y(sample.close));

    for row in 0..rect.h {
        if let Some(cell) = tui.grid_cell_mut(grid, x, row) {
            cell.symbol = '|';
            cell.color.fg = Some(Color::Yellow);
        }
    }
    for col in 0..rect.w {
        if let Some(cell) = tui.grid_cell_mut(grid, col, y) {
            cell.symbol = '-';
            cell.color.fg = Some(Color::Yellow);
        }
    }
    if let Some(cell) = tui.grid_cell_mut(grid, x, y) {
        cell.symbol = ' ';
        cell.color.bg = Some(Color::Yellow);
    }
    tui.set_cursor(rect.x + x, rect.y + y);
}

/// Left/Right move the cursor, Space switches style, d/w/m/y/x zoom.
fn chart_key(tui: &mut Tui, grid: WindowId, key: KeyEvent) -> bool {
    if !key.modifiers.is_empty() {
        return false;
    }
    let Some(stock) = ancestor(tui, grid, "stock") else {
        return false;
    };

    if key.code == KeyCode::Char(' ') {
        let Some(style) = tui.with_payload(stock, |_, chart: &mut Chart| {
            chart.style = chart.style.toggled();
            chart.style
        }) else {
            return false;
        };
        debug!(?style, "chart style");
        report(tui.set_render_hook(grid, Some(style.render_hook())), "switch chart style");
        return true;
    }

    tui.with_payload(stock, |_, chart: &mut Chart| {
        let Some(series) = chart.series.as_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Right if chart.index > 0 => {
                chart.index -= 1;
                true
            }
            KeyCode::Left if chart.index + 1 < series.bars().len() => {
                chart.index += 1;
                true
            }
            KeyCode::Char(ch) => Interval::from_key(ch).is_some_and(|interval| {
                series.zoom(interval);
                true
            }),
            _ => false,
        }
    })
    .unwrap_or(false)
}

// ─── Toolkit-level keys ─────────────────────────────────────────────────────

fn tab_key(tui: &mut Tui, key: KeyEvent) -> bool {
    match (key.code, key.modifiers) {
        (KeyCode::Tab, Modifiers::SHIFT) => tui.tab_backward(),
        (KeyCode::Tab, m) if m.is_empty() => tui.tab_forward(),
        _ => false,
    }
}

fn new_tui() -> Tui {
    Tui::new(TuiConfig {
        color: ColorPair::new(Color::White, Color::Black),
        key: Some(tab_key),
    })
}

// ─── Command line ───────────────────────────────────────────────────────────

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    log: Option<PathBuf>,
    help: bool,
}

fn parse_args(
    args: impl IntoIterator<Item = String>,
    env_log: Option<String>,
) -> Result<Options, String> {
    let mut options = Options {
        log: env_log.filter(|p| !p.is_empty()).map(PathBuf::from),
        help: false,
    };
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => options.help = true,
            "--log" => {
                let path = args.next().ok_or("--log needs a path")?;
                options.log = Some(PathBuf::from(path));
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    Ok(options)
}

/// Send tracing output to `path`. The terminal belongs to the UI, so
/// nothing is logged without a file.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();
    Ok(())
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    let options = parse_args(env::args().skip(1), env::var("WINTUI_LOG").ok())
        .unwrap_or_else(|e| {
            eprintln!("wintui: {e}\n\n{USAGE}");
            process::exit(2);
        });
    if options.help {
        println!("{USAGE}");
        return;
    }
    if let Some(path) = &options.log {
        if let Err(e) = init_logging(path) {
            eprintln!("wintui: cannot open log {}: {e}", path.display());
            process::exit(1);
        }
    }

    let mut tui = new_tui();
    if let Err(e) = build(&mut tui) {
        eprintln!("wintui: {e}");
        process::exit(1);
    }

    info!("starting");
    if let Err(e) = tui.run() {
        eprintln!("wintui: {e}");
        process::exit(1);
    }
    info!("stopped");
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wintui_term::buffer::FrameBuffer;

    // ── Helpers ───────────────────────────────────────────────────────────

    fn app() -> (Tui, FrameBuffer) {
        let mut tui = new_tui();
        build(&mut tui).unwrap();
        let mut buf = FrameBuffer::new(120, 48);
        tui.frame(&mut buf);
        (tui, buf)
    }

    fn press(tui: &mut Tui, buf: &mut FrameBuffer, code: KeyCode) -> bool {
        let handled = tui.dispatch_key(KeyEvent::plain(code));
        tui.frame(buf);
        handled
    }

    fn type_str(tui: &mut Tui, buf: &mut FrameBuffer, s: &str) {
        for ch in s.chars() {
            press(tui, buf, KeyCode::Char(ch));
        }
    }

    fn active_name(tui: &Tui) -> String {
        tui.active_window()
            .and_then(|w| tui.name(w))
            .unwrap_or_default()
            .to_owned()
    }

    fn window(tui: &Tui, path: &str) -> WindowId {
        let root = tui.find_menu("main").map(|m| tui.menu_windows(m)[0]).unwrap();
        tui.find(root, path).unwrap()
    }

    fn chart(tui: &Tui) -> &Chart {
        tui.payload::<Chart>(window(tui, "stock")).unwrap()
    }

    // ── Sample data ───────────────────────────────────────────────────────

    #[test]
    fn series_are_deterministic_per_symbol() {
        let a = Series::lookup("nvda").unwrap();
        let b = Series::lookup("NVDA").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.bars().len(), HISTORY);
        assert_ne!(a.daily, Series::lookup("AAPL").unwrap().daily);
        assert!(Series::lookup("NOPE").is_none());
    }

    #[test]
    fn samples_are_consistent() {
        let series = Series::lookup("TSLA").unwrap();
        for s in series.bars() {
            assert!(s.low <= s.open.min(s.close));
            assert!(s.high >= s.open.max(s.close));
            assert!(s.close > 0.0);
            assert!((100_000..1_000_000).contains(&s.volume));
        }
    }

    #[test]
    fn zoom_merges_bars() {
        let mut series = Series::lookup("BLK").unwrap();
        series.zoom(Interval::Week);
        assert_eq!(series.bars().len(), HISTORY.div_ceil(5));
        let first = series.bars()[0];
        assert_eq!(first.open, series.daily[0].open);
        assert_eq!(first.close, series.daily[4].close);
        assert_eq!(first.volume, series.daily[..5].iter().map(|s| s.volume).sum::<u64>());

        series.zoom(Interval::Max);
        assert!(series.bars().len() <= MAX_BARS);
        series.zoom(Interval::Day);
        assert_eq!(series.bars().len(), HISTORY);
    }

    #[test]
    fn interval_keys() {
        assert_eq!(Interval::from_key('m'), Some(Interval::Month));
        assert_eq!(Interval::from_key('q'), None);
        assert_eq!(Interval::Max.days(0), 1);
    }

    #[test]
    fn scale_puts_high_on_top() {
        let bars = [Sample {
            day: 0,
            open: 10.0,
            high: 20.0,
            low: 10.0,
            close: 15.0,
            volume: 1,
        }];
        let scale = Scale::of(&bars, 11);
        assert_eq!(scale.y(20.0), 0);
        assert_eq!(scale.y(10.0), 10);
        assert_eq!(scale.y(15.0), 5);
        assert_eq!(Scale::of(&bars, 1).y(15.0), 0);
    }

    // ── Window tree ───────────────────────────────────────────────────────

    #[test]
    fn paths_reach_across_columns() {
        let (tui, _) = app();
        let stock = window(&tui, "stock");
        let search = window(&tui, "stocks search");
        let item = window(&tui, "stocks list NVDA");
        assert_eq!(tui.find(search, ". . stock"), Some(stock));
        assert_eq!(tui.find(item, ". . . stock"), Some(stock));
        assert!(tui.find(stock, "data data2 values high").is_some());
    }

    #[test]
    fn starts_on_first_item() {
        let (tui, _) = app();
        assert_eq!(active_name(&tui), "SEK=X");
        let item = tui.active_window().unwrap();
        let symbol = tui.find(item, "symbol").unwrap();
        assert_eq!(tui.plain_text(symbol), Some("SEK=X    "));
    }

    #[test]
    fn arrows_walk_the_list() {
        let (mut tui, mut buf) = app();
        assert!(press(&mut tui, &mut buf, KeyCode::Down));
        assert_eq!(active_name(&tui), "^OMX");
        assert!(press(&mut tui, &mut buf, KeyCode::Up));
        assert_eq!(active_name(&tui), "SEK=X");
        assert!(!press(&mut tui, &mut buf, KeyCode::Up));
    }

    #[test]
    fn typing_focuses_search() {
        let (mut tui, mut buf) = app();
        type_str(&mut tui, &mut buf, "nv");
        assert_eq!(active_name(&tui), "search");
        let text = window(&tui, "stocks search text");
        assert_eq!(tui.plain_text(text), Some("nv "));
        assert_eq!(
            tui.color(window(&tui, "stocks search")),
            Some(ColorPair::bg(Color::Red))
        );
        assert!(tui.cursor().is_some());
    }

    #[test]
    fn search_enter_opens_chart() {
        let (mut tui, mut buf) = app();
        type_str(&mut tui, &mut buf, "nvda");
        assert!(press(&mut tui, &mut buf, KeyCode::Enter));
        assert_eq!(active_name(&tui), "chart");
        let symbol = window(&tui, "stock data data1 values symbol");
        assert_eq!(tui.plain_text(symbol), Some("NVDA"));
        assert_eq!(
            tui.color(window(&tui, "stocks search")),
            Some(ColorPair::bg(Color::Black))
        );
    }

    #[test]
    fn unknown_symbol_keeps_focus() {
        let (mut tui, mut buf) = app();
        type_str(&mut tui, &mut buf, "zzz");
        assert!(press(&mut tui, &mut buf, KeyCode::Enter));
        assert_eq!(active_name(&tui), "search");
        assert!(chart(&tui).series.is_none());
    }

    #[test]
    fn item_enter_charts_its_series() {
        let (mut tui, mut buf) = app();
        press(&mut tui, &mut buf, KeyCode::Down);
        press(&mut tui, &mut buf, KeyCode::Down);
        assert!(press(&mut tui, &mut buf, KeyCode::Enter));
        assert_eq!(active_name(&tui), "chart");
        assert_eq!(chart(&tui).series.as_ref().unwrap().listing.symbol, "NVDA");

        // The crosshair puts the terminal cursor inside the chart.
        let stock = window(&tui, "stock");
        let rect = tui.rect(tui.active_window().unwrap()).unwrap();
        let (x, y) = tui.cursor().unwrap();
        assert_eq!(i32::from(x), rect.x + rect.w - 1);
        assert!((rect.y..rect.y + rect.h).contains(&i32::from(y)));
        assert!(tui.find(stock, "data").is_some());
    }

    #[test]
    fn chart_keys() {
        let (mut tui, mut buf) = app();
        press(&mut tui, &mut buf, KeyCode::Enter);
        let value = window(&tui, "stock value");
        let before = tui.plain_text(value).unwrap().to_owned();

        assert!(!press(&mut tui, &mut buf, KeyCode::Right));
        assert!(press(&mut tui, &mut buf, KeyCode::Left));
        assert_eq!(chart(&tui).index, 1);
        assert_ne!(tui.plain_text(value).unwrap(), before);

        assert!(press(&mut tui, &mut buf, KeyCode::Char(' ')));
        assert_eq!(chart(&tui).style, Style::Candles);
        assert!(press(&mut tui, &mut buf, KeyCode::Char('w')));
        assert_eq!(chart(&tui).series.as_ref().unwrap().interval, Interval::Week);
        assert!(!press(&mut tui, &mut buf, KeyCode::Char('q')));
    }

    #[test]
    fn chart_is_drawn() {
        let (mut tui, mut buf) = app();
        press(&mut tui, &mut buf, KeyCode::Enter);
        let grid = tui.active_window().unwrap();
        let size = tui.grid_size(grid).unwrap();
        assert_eq!(size, tui.rect(grid).unwrap().size());
        let plotted = (0..size.h)
            .flat_map(|y| (0..size.w).map(move |x| (x, y)))
            .filter_map(|(x, y)| tui.grid_cell(grid, x, y))
            .filter(|c| c.color.bg.is_some())
            .count();
        assert!(plotted > 0);
    }

    #[test]
    fn value_before_any_chart() {
        let (tui, _) = app();
        assert_eq!(tui.plain_text(window(&tui, "stock value")), Some("(none, none)"));
    }

    #[test]
    fn tab_moves_focus_and_back() {
        let (mut tui, mut buf) = app();
        let start = tui.active_window();
        assert!(press(&mut tui, &mut buf, KeyCode::Tab));
        assert_ne!(tui.active_window(), start);
        tui.dispatch_key(KeyEvent::new(KeyCode::Tab, Modifiers::SHIFT));
        assert_eq!(tui.active_window(), start);
    }

    #[test]
    fn ctrl_c_stops() {
        let (mut tui, _) = app();
        assert!(tui.dispatch_key(KeyEvent::ctrl('c')));
        assert!(!tui.is_running());
    }

    // ── Command line ──────────────────────────────────────────────────────

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn log_path_from_flag_or_env() {
        assert_eq!(parse_args(args(&[]), None), Ok(Options::default()));
        let from_env = parse_args(args(&[]), Some("a.log".into())).unwrap();
        assert_eq!(from_env.log, Some(PathBuf::from("a.log")));
        let flag = parse_args(args(&["--log", "b.log"]), Some("a.log".into())).unwrap();
        assert_eq!(flag.log, Some(PathBuf::from("b.log")));
        assert_eq!(parse_args(args(&[]), Some(String::new())), Ok(Options::default()));
    }

    #[test]
    fn bad_arguments() {
        assert!(parse_args(args(&["--log"]), None).is_err());
        assert!(parse_args(args(&["--nope"]), None).is_err());
        assert!(parse_args(args(&["-h"]), None).unwrap().help);
    }
}
