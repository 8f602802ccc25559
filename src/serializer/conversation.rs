//! Direct-format mapping: finalize the response and emit its `AppResponse`.

use crate::error::Result;
use crate::response::DirectResponse;

use super::ResponseSerializer;

const METADATA_KEY: &str = "ResponseMetadata";
const LIBRARY_KEY: &str = "GoogleLibraryInfo";

pub(super) fn serialize(
    serializer: &ResponseSerializer,
    mut direct: DirectResponse,
) -> Result<String> {
    let app = direct.finalize();

    let mut value = serde_json::to_value(app)?;
    if serializer.config.include_library_metadata {
        super::inject_library_metadata(
            &mut value,
            METADATA_KEY,
            LIBRARY_KEY,
            &serializer.config.library,
        )?;
    }
    Ok(value.to_string())
}
