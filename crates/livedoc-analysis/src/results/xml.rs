//! Small helpers over the `quick-xml` event API.

use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText};
use rustc_hash::FxHashMap;

/// Element name as UTF-8 (local part only, namespaces ignored).
pub(crate) fn tag(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

pub(crate) fn end_tag(e: &BytesEnd<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// All attributes, unescaped. Malformed attributes are dropped.
pub(crate) fn attributes(e: &BytesStart<'_>) -> FxHashMap<String, String> {
    e.attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
            (key, value)
        })
        .collect()
}

pub(crate) fn text(t: &BytesText<'_>) -> String {
    t.unescape()
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| String::from_utf8_lossy(t).into_owned())
}

pub(crate) fn cdata(c: &BytesCData<'_>) -> String {
    String::from_utf8_lossy(c).into_owned()
}
