//! Controls the device's gate output.

use crate::VoiceReceiver;
use defmt::info;
use embassy_stm32::gpio::Output;
use midicv_lib::voice::GateState;

/// Task responsible for the synth's gate input, toggling an activity LED with every change.
#[embassy_executor::task]
pub async fn gate(
    mut gate: Output<'static>,
    mut activity_led: Output<'static>,
    mut voice_sync: VoiceReceiver<'static>,
) -> ! {
    let mut state = GateState::Low;
    loop {
        let voice = voice_sync.changed().await;
        if voice.gate_state() == state {
            // e.g., a legato note change, which only affects CV
            continue;
        }

        state = voice.gate_state();
        match state {
            GateState::High => {
                info!("Gate is high");
                gate.set_high();
            }
            GateState::Low => {
                info!("Gate is low");
                gate.set_low();
            }
        }
        activity_led.toggle();
    }
}
