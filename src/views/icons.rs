//! Icon catalogue offered by the scope form's icon picker

use once_cell::sync::Lazy;

/// Icons per picker row
pub const ICONS_PER_ROW: usize = 3;

/// Every icon name the picker offers, in display order
pub const ICON_NAMES: &[&str] = &[
    "glass", "music", "search", "envelope", "heart", "star", "star-empty", "user", "film",
    "th-large", "th", "th-list", "ok", "remove", "zoom-in", "zoom-out", "off", "signal", "cog",
    "trash", "home", "file", "time", "road", "download-alt", "download", "upload", "inbox",
    "play-circle", "repeat", "refresh", "list-alt", "lock", "flag", "headphones", "volume-off",
    "volume-down", "volume-up", "qrcode", "barcode", "tag", "tags", "book", "bookmark", "print",
    "camera", "font", "bold", "italic", "text-height", "text-width", "align-left",
    "align-center", "align-right", "align-justify", "list", "indent-left", "indent-right",
    "facetime-video", "picture", "pencil", "map-marker", "tint", "share", "move",
    "fast-backward", "backward", "pause", "stop", "forward", "step-forward", "eject",
    "chevron-right", "plus-sign", "minus-sign", "remove-sign", "ok-sign", "question-sign",
    "info-sign", "screenshot", "remove-circle", "ok-circle", "ban-circle", "arrow-left",
    "arrow-right", "arrow-down", "share-alt", "resize-full", "resize-small", "plus", "asterisk",
    "exclamation-sign", "gift", "leaf", "fire", "eye-close", "plane", "random", "magnet",
    "chevron-up", "chevron-down", "retweet", "shopping-cart", "folder-close", "folder-open",
    "resize-vertical", "resize-horizontal", "hdd", "bell", "thumbs-up", "hand-right",
    "hand-left", "hand-down", "circle-arrow-left", "circle-arrow-up", "circle-arrow-down",
    "globe", "tasks", "briefcase",
];

static ICON_ROWS: Lazy<Vec<&'static [&'static str]>> =
    Lazy::new(|| ICON_NAMES.chunks(ICONS_PER_ROW).collect());

/// The icon list split into picker rows, computed once per process
pub fn icon_rows() -> &'static [&'static [&'static str]] {
    ICON_ROWS.as_slice()
}

pub fn is_known_icon(name: &str) -> bool {
    ICON_NAMES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_hold_three_icons() {
        let rows = icon_rows();
        assert_eq!(rows.len(), ICON_NAMES.len().div_ceil(ICONS_PER_ROW));
        let (last, full) = rows.split_last().unwrap();
        assert!(full.iter().all(|row| row.len() == ICONS_PER_ROW));
        assert!(!last.is_empty() && last.len() <= ICONS_PER_ROW);
    }

    #[test]
    fn test_rows_preserve_order() {
        let flattened: Vec<&str> = icon_rows().iter().flat_map(|row| row.iter().copied()).collect();
        assert_eq!(flattened, ICON_NAMES);
        assert_eq!(icon_rows()[1], &["envelope", "heart", "star"]);
    }

    #[test]
    fn test_rows_are_shared() {
        assert!(std::ptr::eq(icon_rows(), icon_rows()));
    }
}
