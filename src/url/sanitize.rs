/// Characters that end a link embedded in markup
const MARKUP_TERMINATORS: &[char] = &['<', '>', '"', '\''];

/// Escaped ampersand that starts a trailing query tail in result pages
const ESCAPED_AMPERSAND: &str = "&amp;";

/// Strips markup debris and escaped query tails from a raw link match
///
/// The link is cut at the first quote or angle bracket, then at the first
/// `&amp;`.
///
/// # Examples
///
/// ```
/// use price_scout::url::sanitize_link;
///
/// assert_eq!(
///     sanitize_link("https://www.ebay.com/itm/1234\">eBay"),
///     "https://www.ebay.com/itm/1234"
/// );
/// assert_eq!(
///     sanitize_link("https://www.ebay.com/itm/1234?x=1&amp;sa=U"),
///     "https://www.ebay.com/itm/1234?x=1"
/// );
/// ```
pub fn sanitize_link(raw: &str) -> &str {
    let link = match raw.find(MARKUP_TERMINATORS) {
        Some(idx) => &raw[..idx],
        None => raw,
    };

    match link.find(ESCAPED_AMPERSAND) {
        Some(idx) => &link[..idx],
        None => link,
    }
}
