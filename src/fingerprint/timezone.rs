//! Timezone probe.

use super::environment::Environment;
use super::result::TimezoneInfo;
use crate::error::Result;

pub fn probe<E: Environment + ?Sized>(env: &E) -> Result<TimezoneInfo> {
    Ok(TimezoneInfo {
        zone: env.timezone_name()?,
        offset: env.timezone_offset()?,
    })
}
