use crate::core::kpi::normalize_percent_like;

/// Shown in place of a value that is missing or unparseable.
pub const PLACEHOLDER: &str = "—";

const MAX_DECIMALS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayStyle {
    /// Grouped decimal number, e.g. `12,345.6`.
    #[default]
    Number,
    /// US dollars, e.g. `-$1,235`.
    Currency,
    /// Fraction-or-percent guess, then a `%` sign.
    PercentSmart,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormatOptions {
    /// Maximum fraction digits; trailing zeros are trimmed.
    pub decimals: usize,
    pub suffix: String,
    pub multiply: f64,
    pub style: DisplayStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            decimals: 2,
            suffix: String::new(),
            multiply: 1.0,
            style: DisplayStyle::Number,
        }
    }
}

impl FormatOptions {
    pub fn number(decimals: usize) -> Self {
        Self { decimals, ..Default::default() }
    }

    pub fn currency(decimals: usize) -> Self {
        Self { decimals, style: DisplayStyle::Currency, ..Default::default() }
    }

    pub fn percent(decimals: usize) -> Self {
        Self { decimals, style: DisplayStyle::PercentSmart, ..Default::default() }
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    pub fn with_multiply(mut self, multiply: f64) -> Self {
        self.multiply = multiply;
        self
    }
}

/// Render a KPI or tooltip value. `None` and non-finite input give `PLACEHOLDER`.
pub fn format_display(value: Option<f64>, opts: &FormatOptions) -> String {
    let Some(n) = value.map(|v| v * opts.multiply).filter(|v| v.is_finite()) else {
        return PLACEHOLDER.to_string();
    };

    let body = match opts.style {
        DisplayStyle::Number => group_thousands(&fixed(n, opts.decimals)),
        DisplayStyle::Currency => {
            let digits = group_thousands(&fixed(n.abs(), opts.decimals));
            if n < 0.0 && digits != "0" {
                format!("-${}", digits)
            } else {
                format!("${}", digits)
            }
        }
        DisplayStyle::PercentSmart => {
            format!("{}%", group_thousands(&fixed(normalize_percent_like(n), opts.decimals)))
        }
    };

    format!("{}{}", body, opts.suffix)
}

/// Round half away from zero to at most `decimals` digits, then trim zeros.
fn fixed(n: f64, decimals: usize) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    let scale = 10f64.powi(decimals as i32);
    let scaled = n * scale;
    let rounded = if scaled.is_finite() { scaled.round() / scale } else { n };

    let mut s = format!("{:.*}", decimals, rounded);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }

    // -0.001 rounded to "-0"
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s.remove(0);
    }
    s
}

/// "1234567.5" -> "1,234,567.5"
fn group_thousands(s: &str) -> String {
    let (int_part, frac_part) = match s.find('.') {
        Some(dot) => (&s[..dot], &s[dot..]),
        None => (s, ""),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut out = String::from(sign);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(frac_part);
    out
}
