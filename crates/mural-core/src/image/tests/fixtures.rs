use crate::ids::ImageId;
use crate::image::{ImagePayload, ImageRecord, MimeType, Provenance};

pub fn record(id: &str) -> ImageRecord {
    let mut record = ImageRecord::new_user(
        ImagePayload::from_bytes(MimeType::image_png(), vec![0x89, 0x50, 0x4e, 0x47]),
        Provenance::upload(1_700_000_000_000),
    );
    record.id = ImageId::from(id);
    record
}

pub fn dehydrated_record(id: &str) -> ImageRecord {
    let mut record = record(id);
    record.backing_file_name = Some(format!("{id}.png"));
    record.payload = None;
    record
}

pub fn environment_record(id: &str) -> ImageRecord {
    let mut record = ImageRecord::new_environment(
        ImagePayload::from_bytes(MimeType::image_png(), vec![0x89, 0x50, 0x4e, 0x47]),
        Provenance::environment(1_700_000_000_000, None),
    );
    record.id = ImageId::from(id);
    record
}
