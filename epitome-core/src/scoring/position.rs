/// Positional score of a sentence from 0-based coordinates.
///
/// With 1-based paragraph position `p` of `SP` paragraphs and 1-based
/// sentence position `spip` of `SIP` sentences in that paragraph, the score
/// is `((SP - p + 1) / SP) · ((SIP - spip + 1) / SIP)`.
pub fn normalized_position(
    paragraph: usize,
    paragraph_count: usize,
    sentence: usize,
    paragraph_len: usize,
) -> f64 {
    if paragraph_count == 0 || paragraph_len == 0 {
        return 0.0;
    }
    let sp = paragraph_count as f64;
    let sip = paragraph_len as f64;
    ((sp - paragraph as f64) / sp) * ((sip - sentence as f64) / sip)
}
