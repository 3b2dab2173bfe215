//! Theme system: named palettes and value-to-color gradients.
//!
//! Themes form a closed set selected by name. An unrecognized name yields
//! the complete default theme, never a partial one.

use ratatui::style::Color;

/// A color gradient with evenly spaced stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradient {
    /// Gradient color stops.
    pub stops: Vec<Color>,
}

impl Gradient {
    /// Creates a gradient from hex stops (`"#rrggbb"`).
    #[must_use]
    pub fn from_hex(stops: &[&str]) -> Self {
        Self { stops: stops.iter().map(|s| parse_color(s)).collect() }
    }

    /// Samples the gradient at position t (0.0 - 1.0).
    #[must_use]
    pub fn sample(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self.stops.len() {
            0 => Color::White,
            1 => self.stops[0],
            n => {
                let segment_count = n - 1;
                let segment_size = 1.0 / segment_count as f64;
                let segment = ((t / segment_size) as usize).min(segment_count - 1);
                let local_t = (t - segment as f64 * segment_size) / segment_size;

                interpolate_color(self.stops[segment], self.stops[segment + 1], local_t)
            }
        }
    }

    /// Picks the stop for `t` without blending (stepped lookup).
    #[must_use]
    pub fn step(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self.stops.len() {
            0 => Color::White,
            n => self.stops[((t * n as f64) as usize).min(n - 1)],
        }
    }
}

/// Ten CPU usage breakpoints, green at idle to red at saturation.
const CPU_STEPS: [&str; 10] = [
    "#50fa7b", "#69f06a", "#8ae65a", "#b0dc4c", "#d4d242", "#f1c83c", "#f7a53a", "#f7823a",
    "#f25d3c", "#ff3b3b",
];

/// Assumed sensor band for the temperature gradient, in °C.
pub const TEMP_MIN_C: f64 = 30.0;
/// Upper end of the temperature band, in °C.
pub const TEMP_MAX_C: f64 = 100.0;

/// Theme record: one color per UI role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Theme name.
    pub name: &'static str,
    /// Panel borders.
    pub border: Color,
    /// Panel titles.
    pub title: Color,
    /// Regular text.
    pub text: Color,
    /// De-emphasized text (labels, separators, empty bar cells).
    pub dim: Color,
    /// CPU accents.
    pub cpu: Color,
    /// Memory accents.
    pub memory: Color,
    /// Swap accents.
    pub swap: Color,
    /// Network download.
    pub network_rx: Color,
    /// Network upload.
    pub network_tx: Color,
    /// Disk accents.
    pub disk: Color,
    /// Process table accents.
    pub process: Color,
    /// Temperature label.
    pub temp: Color,
    /// Battery label.
    pub battery: Color,
    /// Sparkline default.
    pub graph: Color,
    /// Severity: normal.
    pub ok: Color,
    /// Severity: elevated.
    pub warn: Color,
    /// Severity: critical.
    pub critical: Color,
    /// Selected process row, drawn in reverse video.
    pub selection: Color,
    /// Usage gradient for CPU bars (ten steps).
    pub cpu_gradient: Gradient,
    /// Usage gradient for memory/disk bars.
    pub usage_gradient: Gradient,
    /// Temperature gradient over [`TEMP_MIN_C`]..[`TEMP_MAX_C`].
    pub temp_gradient: Gradient,
}

/// Names of the built-in themes, default first.
pub const THEME_NAMES: [&str; 6] = ["default", "dracula", "nord", "gruvbox", "monokai", "mono"];

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default",
            border: parse_color("#5f87af"),
            title: parse_color("#e0e0e0"),
            text: parse_color("#c0caf5"),
            dim: parse_color("#565f89"),
            cpu: parse_color("#64c8ff"),
            memory: parse_color("#b478ff"),
            swap: parse_color("#ffb464"),
            network_rx: parse_color("#64c8ff"),
            network_tx: parse_color("#ff6464"),
            disk: parse_color("#64b4ff"),
            process: parse_color("#dcb464"),
            temp: parse_color("#ff6496"),
            battery: parse_color("#ffdc64"),
            graph: parse_color("#64c8ff"),
            ok: parse_color("#50fa7b"),
            warn: parse_color("#f1c83c"),
            critical: parse_color("#ff3b3b"),
            selection: parse_color("#7aa2f7"),
            cpu_gradient: Gradient::from_hex(&CPU_STEPS),
            usage_gradient: Gradient::from_hex(&["#9ece6a", "#e0af68", "#f7768e"]),
            temp_gradient: Gradient::from_hex(&["#7dcfff", "#e0af68", "#f7768e"]),
        }
    }
}

impl Theme {
    /// Looks up a built-in theme; unknown names fall back to the default.
    #[must_use]
    pub fn by_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "dracula" => Self::dracula(),
            "nord" => Self::nord(),
            "gruvbox" => Self::gruvbox(),
            "monokai" => Self::monokai(),
            "mono" => Self::mono(),
            _ => Self::default(),
        }
    }

    /// Whether `name` is one of [`THEME_NAMES`].
    #[must_use]
    pub fn is_known(name: &str) -> bool {
        let name = name.trim().to_ascii_lowercase();
        THEME_NAMES.contains(&name.as_str())
    }

    fn dracula() -> Self {
        Self {
            name: "dracula",
            border: parse_color("#6272a4"),
            title: parse_color("#f8f8f2"),
            text: parse_color("#f8f8f2"),
            dim: parse_color("#44475a"),
            cpu: parse_color("#8be9fd"),
            memory: parse_color("#bd93f9"),
            swap: parse_color("#ffb86c"),
            network_rx: parse_color("#50fa7b"),
            network_tx: parse_color("#ff79c6"),
            disk: parse_color("#8be9fd"),
            process: parse_color("#f1fa8c"),
            temp: parse_color("#ff5555"),
            battery: parse_color("#f1fa8c"),
            graph: parse_color("#bd93f9"),
            ok: parse_color("#50fa7b"),
            warn: parse_color("#f1fa8c"),
            critical: parse_color("#ff5555"),
            selection: parse_color("#bd93f9"),
            temp_gradient: Gradient::from_hex(&["#8be9fd", "#f1fa8c", "#ff5555"]),
            usage_gradient: Gradient::from_hex(&["#50fa7b", "#f1fa8c", "#ff5555"]),
            ..Self::default()
        }
    }

    fn nord() -> Self {
        Self {
            name: "nord",
            border: parse_color("#4c566a"),
            title: parse_color("#eceff4"),
            text: parse_color("#d8dee9"),
            dim: parse_color("#434c5e"),
            cpu: parse_color("#88c0d0"),
            memory: parse_color("#b48ead"),
            swap: parse_color("#d08770"),
            network_rx: parse_color("#8fbcbb"),
            network_tx: parse_color("#bf616a"),
            disk: parse_color("#81a1c1"),
            process: parse_color("#ebcb8b"),
            temp: parse_color("#bf616a"),
            battery: parse_color("#ebcb8b"),
            graph: parse_color("#88c0d0"),
            ok: parse_color("#a3be8c"),
            warn: parse_color("#ebcb8b"),
            critical: parse_color("#bf616a"),
            selection: parse_color("#88c0d0"),
            temp_gradient: Gradient::from_hex(&["#88c0d0", "#ebcb8b", "#bf616a"]),
            usage_gradient: Gradient::from_hex(&["#a3be8c", "#ebcb8b", "#bf616a"]),
            ..Self::default()
        }
    }

    fn gruvbox() -> Self {
        Self {
            name: "gruvbox",
            border: parse_color("#665c54"),
            title: parse_color("#fbf1c7"),
            text: parse_color("#ebdbb2"),
            dim: parse_color("#504945"),
            cpu: parse_color("#83a598"),
            memory: parse_color("#d3869b"),
            swap: parse_color("#fe8019"),
            network_rx: parse_color("#8ec07c"),
            network_tx: parse_color("#fb4934"),
            disk: parse_color("#83a598"),
            process: parse_color("#fabd2f"),
            temp: parse_color("#fb4934"),
            battery: parse_color("#fabd2f"),
            graph: parse_color("#b8bb26"),
            ok: parse_color("#b8bb26"),
            warn: parse_color("#fabd2f"),
            critical: parse_color("#fb4934"),
            selection: parse_color("#83a598"),
            temp_gradient: Gradient::from_hex(&["#83a598", "#fabd2f", "#fb4934"]),
            usage_gradient: Gradient::from_hex(&["#b8bb26", "#fabd2f", "#fb4934"]),
            ..Self::default()
        }
    }

    fn monokai() -> Self {
        Self {
            name: "monokai",
            border: parse_color("#75715e"),
            title: parse_color("#f8f8f2"),
            text: parse_color("#f8f8f2"),
            dim: parse_color("#49483e"),
            cpu: parse_color("#66d9ef"),
            memory: parse_color("#ae81ff"),
            swap: parse_color("#fd971f"),
            network_rx: parse_color("#a6e22e"),
            network_tx: parse_color("#f92672"),
            disk: parse_color("#66d9ef"),
            process: parse_color("#e6db74"),
            temp: parse_color("#f92672"),
            battery: parse_color("#e6db74"),
            graph: parse_color("#a6e22e"),
            ok: parse_color("#a6e22e"),
            warn: parse_color("#e6db74"),
            critical: parse_color("#f92672"),
            selection: parse_color("#66d9ef"),
            ..Self::default()
        }
    }

    fn mono() -> Self {
        let light = parse_color("#d0d0d0");
        let mid = parse_color("#909090");
        let dark = parse_color("#505050");
        Self {
            name: "mono",
            border: mid,
            title: light,
            text: light,
            dim: dark,
            cpu: light,
            memory: light,
            swap: mid,
            network_rx: light,
            network_tx: mid,
            disk: light,
            process: light,
            temp: light,
            battery: light,
            graph: light,
            ok: light,
            warn: light,
            critical: parse_color("#ffffff"),
            selection: light,
            cpu_gradient: Gradient::from_hex(&["#606060", "#ffffff"]),
            usage_gradient: Gradient::from_hex(&["#606060", "#ffffff"]),
            temp_gradient: Gradient::from_hex(&["#606060", "#ffffff"]),
        }
    }

    /// Bar color for a CPU usage percentage (ten stepped breakpoints).
    #[must_use]
    pub fn cpu_color(&self, percent: f64) -> Color {
        self.cpu_gradient.step(percent / 100.0)
    }

    /// Blended color for a memory/disk usage percentage.
    #[must_use]
    pub fn usage_color(&self, percent: f64) -> Color {
        self.usage_gradient.sample(percent / 100.0)
    }

    /// Color for a temperature in °C over the assumed 30–100 °C band.
    #[must_use]
    pub fn temp_color(&self, celsius: f64) -> Color {
        self.temp_gradient.sample((celsius - TEMP_MIN_C) / (TEMP_MAX_C - TEMP_MIN_C))
    }

    /// Severity color for a percentage: ok below 60, warn below 85.
    #[must_use]
    pub fn severity(&self, percent: f64) -> Color {
        if percent >= 85.0 {
            self.critical
        } else if percent >= 60.0 {
            self.warn
        } else {
            self.ok
        }
    }
}

/// Parses a hex color string to a ratatui Color.
pub fn parse_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');

    if hex.len() != 6 || !hex.is_ascii() {
        return Color::White;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

    Color::Rgb(r, g, b)
}

/// Interpolates between two colors.
fn interpolate_color(start: Color, end: Color, t: f64) -> Color {
    let (r1, g1, b1) = color_to_rgb(start);
    let (r2, g2, b2) = color_to_rgb(end);

    let r = ((1.0 - t) * f64::from(r1) + t * f64::from(r2)).round() as u8;
    let g = ((1.0 - t) * f64::from(g1) + t * f64::from(g2)).round() as u8;
    let b = ((1.0 - t) * f64::from(b1) + t * f64::from(b2)).round() as u8;

    Color::Rgb(r, g, b)
}

/// Extracts RGB values from a Color.
fn color_to_rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        _ => (255, 255, 255),
    }
}
