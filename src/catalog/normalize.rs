/// Project raw ingredient text onto lowercase ASCII words separated by single spaces.
///
/// Every character that is not `a`-`z` after lower-casing becomes a word break,
/// so `"2 cups Flour, sifted"` normalizes to `"cups flour sifted"`.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut out = String::with_capacity(lowered.len());

    for word in lowered
        .split(|c: char| !c.is_ascii_lowercase())
        .filter(|w| !w.is_empty())
    {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }

    out
}
