//! Nearest-name lookup for raw tag colors.

/// Reference palette of named spool colors with their RGB values.
pub const PALETTE: [(&str, [u8; 3]); 21] = [
    ("Jade White", [255, 255, 255]),
    ("Beige", [247, 230, 188]),
    ("Gold", [228, 189, 104]),
    ("Silver", [166, 169, 174]),
    ("Gray", [142, 144, 146]),
    ("Bronze", [132, 125, 72]),
    ("Brown", [157, 95, 63]),
    ("Red", [193, 46, 52]),
    ("Magenta", [236, 0, 140]),
    ("Pink", [245, 190, 205]),
    ("Orange", [255, 106, 19]),
    ("Yellow", [244, 211, 68]),
    ("Bambu Green", [0, 174, 66]),
    ("Mistletoe Green", [63, 142, 67]),
    ("Cyan", [0, 134, 214]),
    ("Blue", [10, 41, 129]),
    ("Purple", [94, 67, 183]),
    ("Blue Gray", [91, 101, 121]),
    ("Light Gray", [209, 211, 213]),
    ("Dark Gray", [84, 84, 84]),
    ("Black", [0, 0, 0]),
];

/// Name of the palette entry closest to `(r, g, b)` by Euclidean distance.
/// Ties keep the first palette entry; this never fails.
pub fn nearest_color_name(r: u8, g: u8, b: u8) -> &'static str {
    let mut best_name = PALETTE[0].0;
    let mut best_dist = u32::MAX;
    for (name, [pr, pg, pb]) in PALETTE {
        // Squared distance orders the same as Euclidean distance
        let dr = i32::from(r) - i32::from(pr);
        let dg = i32::from(g) - i32::from(pg);
        let db = i32::from(b) - i32::from(pb);
        let dist = (dr * dr + dg * dg + db * db) as u32;
        if dist < best_dist {
            best_dist = dist;
            best_name = name;
        }
    }
    best_name
}
