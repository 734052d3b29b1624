//! SVG sparklines.

use trellis_dom::AttrValue;

/// Drawing options for [`render`].
#[derive(Debug, Clone, PartialEq)]
pub struct SparklineOptions {
    /// Width of the SVG viewport.
    pub width: u32,
    /// Height of the SVG viewport.
    pub height: u32,
    /// Stroke color of the polyline.
    pub line_color: String,
    /// Stroke width of the polyline.
    pub line_width: f64,
    /// Value mapped to the bottom edge; defaults to the series minimum.
    pub min_value: Option<f64>,
    /// Value mapped to the top edge; defaults to the series maximum.
    pub max_value: Option<f64>,
}

impl Default for SparklineOptions {
    fn default() -> Self {
        Self {
            width: 100,
            height: 20,
            line_color: "currentColor".to_string(),
            line_width: 1.5,
            min_value: None,
            max_value: None,
        }
    }
}

/// Render `data` as an inline SVG polyline.
///
/// An empty series renders as an empty string. A single point is centered
/// horizontally. When the value range is empty the upper bound is widened
/// by one.
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn render(data: &[f64], options: &SparklineOptions) -> String {
    if data.is_empty() {
        return String::new();
    }

    let min = options
        .min_value
        .unwrap_or_else(|| data.iter().copied().fold(f64::INFINITY, f64::min));
    let mut max = options
        .max_value
        .unwrap_or_else(|| data.iter().copied().fold(f64::NEG_INFINITY, f64::max));
    if min == max {
        max = min + 1.0;
    }

    let width = f64::from(options.width);
    let height = f64::from(options.height);
    let last = data.len() - 1;
    let points: Vec<String> = data
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x = if last == 0 {
                width / 2.0
            } else {
                i as f64 / last as f64 * width
            };
            let y = height - (value - min) / (max - min) * height;
            format!("{x:.1},{y:.1}")
        })
        .collect();

    format!(
        "<svg width=\"{w}\" height=\"{h}\" class=\"sparkline\" viewBox=\"0 0 {w} {h}\" \
         xmlns=\"http://www.w3.org/2000/svg\"><polyline fill=\"none\" stroke=\"{color}\" \
         stroke-width=\"{stroke}\" points=\"{points}\"/></svg>",
        w = options.width,
        h = options.height,
        color = options.line_color,
        stroke = AttrValue::Float(options.line_width),
        points = points.join(" "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series() {
        assert_eq!(render(&[], &SparklineOptions::default()), "");
    }

    #[test]
    fn test_single_point_is_centered() {
        let svg = render(&[3.0], &SparklineOptions::default());
        assert!(svg.contains("points=\"50.0,20.0\""), "{svg}");
    }

    #[test]
    fn test_flat_series_widens_range() {
        let options = SparklineOptions {
            width: 10,
            height: 4,
            ..SparklineOptions::default()
        };
        assert_eq!(
            render(&[5.0, 5.0, 5.0], &options),
            "<svg width=\"10\" height=\"4\" class=\"sparkline\" viewBox=\"0 0 10 4\" \
             xmlns=\"http://www.w3.org/2000/svg\"><polyline fill=\"none\" \
             stroke=\"currentColor\" stroke-width=\"1.5\" \
             points=\"0.0,4.0 5.0,4.0 10.0,4.0\"/></svg>"
        );
    }

    #[test]
    fn test_rising_series() {
        let options = SparklineOptions {
            width: 10,
            height: 10,
            ..SparklineOptions::default()
        };
        let svg = render(&[0.0, 5.0, 10.0], &options);
        assert!(svg.contains("points=\"0.0,10.0 5.0,5.0 10.0,0.0\""), "{svg}");
    }

    #[test]
    fn test_explicit_bounds_and_style() {
        let options = SparklineOptions {
            width: 4,
            height: 8,
            line_color: "red".to_string(),
            line_width: 2.0,
            min_value: Some(0.0),
            max_value: Some(4.0),
        };
        let svg = render(&[1.0, 2.0], &options);
        assert!(svg.contains("stroke=\"red\" stroke-width=\"2.0\""), "{svg}");
        assert!(svg.contains("points=\"0.0,6.0 4.0,4.0\""), "{svg}");
    }
}
