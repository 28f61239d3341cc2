//! Line-colour and display-name cosmetics.
//!
//! Line colours are an external collaborator's concern (§ Non-goals), but
//! the response schema still carries the field the frontend renders with,
//! so this is the same small lookup table the reference implementation
//! hardcodes rather than a live styling service.

const BUS_COLOR: &str = "#ef4444";
const DEFAULT_RAIL_COLOR: &str = "#3b82f6";

const TUBE_COLORS: &[(&str, &str)] = &[
    ("bakerloo", "#B36305"),
    ("central", "#E32017"),
    ("circle", "#FFD300"),
    ("district", "#00782A"),
    ("hammersmith-city", "#F3A9BB"),
    ("jubilee", "#A0A5A9"),
    ("metropolitan", "#9B0056"),
    ("northern", "#000000"),
    ("piccadilly", "#003688"),
    ("victoria", "#0098D4"),
    ("waterloo-city", "#95CDBA"),
];

const RAIL_COLORS: &[(&str, &str)] = &[
    ("Southeastern", "#1E1E50"),
    ("Southern", "#003F2E"),
    ("Thameslink", "#E9418B"),
    ("London Overground", "#EE7C0E"),
    ("Elizabeth Line", "#6E4C9F"),
];

pub fn bus_color() -> &'static str {
    BUS_COLOR
}

/// Display name and colour for a tube `route_id` (the line id, e.g.
/// `"central"`), if recognized.
pub fn tube_line_info(route_id: &str) -> Option<(String, &'static str)> {
    let key = route_id.to_lowercase();
    TUBE_COLORS.iter().find(|(id, _)| *id == key).map(|(id, color)| (id.replace('-', " "), *color))
}

/// Display name and colour for a rail `route_id` (`"{operator}/{destCRS}"`).
/// Falls back to the default rail colour when the operator isn't in the
/// table — a segment is still labeled `rail`, just uncoloured to spec.
pub fn rail_line_info(route_id: &str) -> (String, &'static str) {
    match route_id.split_once('/') {
        Some((operator, dest_crs)) => {
            let color = RAIL_COLORS.iter().find(|(name, _)| *name == operator).map(|(_, color)| *color).unwrap_or(DEFAULT_RAIL_COLOR);
            (format!("{operator}/{dest_crs}"), color)
        }
        None => (route_id.to_string(), DEFAULT_RAIL_COLOR),
    }
}
