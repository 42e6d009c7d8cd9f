//! Controls the device's CV output.

use crate::VoiceReceiver;
use defmt::info;
use embassy_stm32::{
    dac::{DacCh1, Value},
    mode::Async,
    peripherals::DAC1,
};
use measurements::Voltage;

/// The DAC's reference voltage, i.e., the voltage output for the maximum DAC value.
const DAC_REFERENCE_VOLTS: f64 = 10.0 / 3.0;

/// The maximum value of the 12-bit DAC.
const DAC_MAX: f64 = 4095.0;

/// Helper function to convert a control voltage into a <abbr name="digital-to-analog converter">DAC</abbr> value.
///
/// Voltages beyond what the DAC can produce saturate at its reference voltage.
fn voltage_to_dac_value(voltage: Voltage) -> Value {
    Value::Bit12Right(
        (voltage.as_volts() / DAC_REFERENCE_VOLTS * DAC_MAX)
            .clamp(0.0, DAC_MAX)
            // Casting to u16 serves as a quick and dirty rounding. The DAC resolution is high enough that it doesn't
            // matter.
            as u16,
    )
}

/// Task responsible for sending the voice's control voltage to the synth.
#[embassy_executor::task]
pub async fn control_voltage(
    mut dac: DacCh1<'static, DAC1, Async>,
    mut voice_sync: VoiceReceiver<'static>,
) -> ! {
    loop {
        let voice = voice_sync.changed().await;
        let voltage = voice.control_voltage();

        let dac_value = voltage_to_dac_value(voltage);
        info!(
            "Sending {} to DAC to achieve a voltage of {}",
            dac_value,
            voltage.as_volts()
        );
        dac.set(dac_value);
    }
}
