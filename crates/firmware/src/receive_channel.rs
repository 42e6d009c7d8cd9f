//! Tasks and types related to the channel on which MIDI is received.

use embassy_stm32::{exti::ExtiInput, gpio::Output};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    watch::{Receiver, Sender, Watch},
};
use embassy_time::Timer;
use midicv_lib::configuration::{CycleConfig, ReceiveChannel};

const RECEIVE_CHANNEL_RECEIVER_CNT: usize = 2;
/// Syncs the [`ReceiveChannel`] across tasks.
pub static RECEIVE_CHANNEL_SYNC: Watch<
    CriticalSectionRawMutex,
    ReceiveChannel,
    RECEIVE_CHANNEL_RECEIVER_CNT,
> = Watch::new_with(ReceiveChannel::Omni);
pub type ReceiveChannelSender<'a> =
    Sender<'a, CriticalSectionRawMutex, ReceiveChannel, RECEIVE_CHANNEL_RECEIVER_CNT>;
pub type ReceiveChannelReceiver<'a> =
    Receiver<'a, CriticalSectionRawMutex, ReceiveChannel, RECEIVE_CHANNEL_RECEIVER_CNT>;

/// Handles button presses, cycling through omni mode and channels 1-16.
#[embassy_executor::task]
pub async fn select_receive_channel(
    mut button: ExtiInput<'static>,
    receive_channel: ReceiveChannelSender<'static>,
) -> ! {
    loop {
        button.wait_for_rising_edge().await;

        let new_state = receive_channel
            .try_get()
            .expect("Receive channel should never be uninitialized")
            .cycle();
        receive_channel.send(new_state);
    }
}

/// Provides a quick and dirty status indicator for the [`ReceiveChannel`].
///
/// Each cycle is divided in half. The LED remains dark for one half. For the other, the LED lights up N times, where N
/// is one more than the channel number (so omni mode blinks once and channel 16 blinks seventeen times).
#[embassy_executor::task]
pub async fn display_receive_channel(
    mut led: Output<'static>,
    mut receive_channel: ReceiveChannelReceiver<'static>,
) -> ! {
    const BLINK_PERIOD_US: u64 = 2_000_000;

    loop {
        led.set_low();
        Timer::after_micros(BLINK_PERIOD_US).await;

        let blink_cnt = receive_channel.get().await.number().saturating_add(1);
        // mult by two to account for the "off" periods, sub 1 so the LED always starts and ends lit
        let animation_frames = blink_cnt * 2 - 1;
        let mut counter = animation_frames;
        while counter > 0 {
            led.toggle();
            Timer::after_micros(BLINK_PERIOD_US / u64::from(animation_frames)).await;
            counter -= 1;
        }
    }
}
