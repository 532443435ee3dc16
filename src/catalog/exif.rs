use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// EXIFの撮影日時を取得（タイムゾーン情報がないためUTCとみなす）
pub fn capture_time(path: &Path) -> Option<DateTime<Utc>> {
    let file = File::open(path).ok()?;
    let mut bufreader = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut bufreader).ok()?;

    // DateTimeOriginal → DateTime の順に探す
    exif.get_field(exif::Tag::DateTimeOriginal, exif::In::PRIMARY)
        .or_else(|| exif.get_field(exif::Tag::DateTime, exif::In::PRIMARY))
        .and_then(parse_field)
}

fn parse_field(field: &exif::Field) -> Option<DateTime<Utc>> {
    let exif::Value::Ascii(ref values) = field.value else {
        return None;
    };
    let raw = values.first()?;
    let dt = exif::DateTime::from_ascii(raw).ok()?;

    let naive = NaiveDate::from_ymd_opt(i32::from(dt.year), u32::from(dt.month), u32::from(dt.day))?
        .and_hms_opt(u32::from(dt.hour), u32::from(dt.minute), u32::from(dt.second))?;
    Some(Utc.from_utc_datetime(&naive))
}
