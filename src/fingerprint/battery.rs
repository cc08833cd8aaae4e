//! Battery status probe.

use super::environment::Environment;
use super::result::BatteryInfo;
use crate::error::Result;

pub async fn probe<E: Environment + ?Sized>(env: &E) -> Result<BatteryInfo> {
    let battery = env.battery().await?;
    Ok(BatteryInfo {
        level: battery.level.clamp(0.0, 1.0),
        ..battery
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use crate::fingerprint::testing::FakeEnvironment;
    use futures::executor::block_on;

    #[test]
    fn passes_status_through() {
        let env = FakeEnvironment::desktop();
        let battery = block_on(probe(&env)).unwrap();
        assert!(battery.charging);
        assert_eq!(battery.level, 0.8);
        assert!(battery.discharging_time.is_infinite());
    }

    #[test]
    fn rejection_is_an_error() {
        let mut env = FakeEnvironment::desktop();
        env.battery = Err(ProbeError::Rejected("NotAllowedError".into()));
        assert!(block_on(probe(&env)).is_err());
    }
}
