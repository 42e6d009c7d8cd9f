//! [Embassy](https://embassy.dev)-based firmware for a serial MIDI to CV/gate adapter. The firmware runs on the
//! [Nucleo-F767ZI development board](https://www.st.com/en/evaluation-tools/nucleo-f767zi.html), which is powered by an
//! F7-series STM32 microcontroller.
//!
//! It receives a MIDI 1.0 byte stream on a serial port (e.g., from a DIN-5 jack via an optocoupler), decodes it with
//! [`midicv_lib::receiver::Receiver`], and expresses the resulting monophonic voice as a control voltage (DAC) and a
//! gate (GPIO) for an analog synthesizer. A pushbutton selects the channel MIDI is received on.

#![no_std]
#![no_main]

mod control_voltage;
mod gate;
mod receive_channel;

use crate::receive_channel::{RECEIVE_CHANNEL_SYNC, ReceiveChannelReceiver};
use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_stm32::{
    Config, bind_interrupts,
    dac::DacCh1,
    exti::ExtiInput,
    gpio::{Level, Output, Pull, Speed},
    peripherals,
    time::Hertz,
    usart::{self, RingBufferedUartRx, UartRx},
};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    watch::{Receiver, Sender, Watch},
};
use midicv_lib::{configuration::ReceiverConfig, receiver, voice::MonoVoice};
use static_cell::StaticCell;

use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(
    #[doc(hidden)]
    struct Irqs {
        USART6 => usart::InterruptHandler<peripherals::USART6>;
    }
);

/// MIDI 1.0 serial transport runs at 31.25 kbaud.
const MIDI_BAUD_RATE: u32 = 31_250;

const VOICE_RECEIVER_CNT: usize = 2;
type VoiceSync = Watch<CriticalSectionRawMutex, MonoVoice, VOICE_RECEIVER_CNT>;
type VoiceSender<'a> = Sender<'a, CriticalSectionRawMutex, MonoVoice, VOICE_RECEIVER_CNT>;
type VoiceReceiver<'a> = Receiver<'a, CriticalSectionRawMutex, MonoVoice, VOICE_RECEIVER_CNT>;

/// Synchronizes the state of the voice between the MIDI task and the output tasks.
static VOICE_SYNC: VoiceSync = Watch::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Initializing MIDI to CV adapter");

    let mut config = Config::default();
    {
        use embassy_stm32::rcc::*;
        // hse: high-speed external clock
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Bypass,
        });

        // pll: phase-locked loop, crucial for dividing clock
        config.rcc.pll_src = PllSource::HSE;
        config.rcc.pll = Some(Pll {
            prediv: PllPreDiv::DIV4,
            mul: PllMul::MUL216,
            divp: Some(PllPDiv::DIV2), // 8mhz / 4 * 216 / 2 = 216Mhz
            divq: None,
            divr: None,
        });
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV4;
        config.rcc.apb2_pre = APBPrescaler::DIV2;
        config.rcc.sys = Sysclk::PLL1_P;
    }
    let p = embassy_stm32::init(config);

    let button = ExtiInput::new(p.PC13, p.EXTI13, Pull::None);
    unwrap!(spawner.spawn(receive_channel::select_receive_channel(
        button,
        RECEIVE_CHANNEL_SYNC.sender()
    )));

    let red_led = Output::new(p.PB14, Level::Low, Speed::Low);
    let receive_channel = RECEIVE_CHANNEL_SYNC
        .receiver()
        .expect("Receive channel synchronizer should have a receiver available");
    unwrap!(spawner.spawn(receive_channel::display_receive_channel(
        red_led,
        receive_channel
    )));

    // USART6 RX is routed to PG9 (CN10 on the Nucleo board); TX is unused as the device is receive-only
    let mut uart_config = usart::Config::default();
    uart_config.baudrate = MIDI_BAUD_RATE;
    let rx = unwrap!(UartRx::new(p.USART6, Irqs, p.PG9, p.DMA2_CH1, uart_config));
    static RX_DMA_BUFFER: StaticCell<[u8; 64]> = StaticCell::new();
    let rx = rx.into_ring_buffered(RX_DMA_BUFFER.init([0; 64]));

    // per RM0410 (the reference manual for the chip), DAC channel 1 outputs on port A, pin 4
    let dac = DacCh1::new(p.DAC1, p.DMA1_CH5, p.PA4);

    let voice_sender = VOICE_SYNC.sender();
    voice_sender.send(MonoVoice::default());

    let voice_receiver = VOICE_SYNC
        .receiver()
        .expect("Voice synchronizer should have a receiver available");
    unwrap!(spawner.spawn(control_voltage::control_voltage(dac, voice_receiver)));

    let switch_trigger = Output::new(p.PG0, Level::Low, Speed::Low);
    let green_led = Output::new(p.PB0, Level::Low, Speed::Low);
    let voice_receiver = VOICE_SYNC
        .receiver()
        .expect("Voice synchronizer should have a receiver available");
    unwrap!(spawner.spawn(gate::gate(switch_trigger, green_led, voice_receiver)));

    let receive_channel = RECEIVE_CHANNEL_SYNC
        .receiver()
        .expect("Receive channel synchronizer should have a receiver available");
    unwrap!(spawner.spawn(midi_task(rx, receive_channel, voice_sender)));
}

/// Task responsible for decoding the serial MIDI stream.
///
/// Every byte is fed to the receiver in the order it arrived; the voice is published whenever a byte changes it.
/// Changing the receive channel reinitializes the receiver.
#[embassy_executor::task]
async fn midi_task(
    mut rx: RingBufferedUartRx<'static>,
    mut receive_channel: ReceiveChannelReceiver<'static>,
    voice_sync: VoiceSender<'static>,
) -> ! {
    let mut receiver = receiver::Receiver::new(ReceiverConfig::default(), MonoVoice::handlers());
    let mut voice = MonoVoice::default();
    let mut buf = [0; 32];
    loop {
        match select(rx.read(&mut buf), receive_channel.changed()).await {
            Either::First(Ok(n)) => {
                let previous = voice;
                receiver.receive_all(&buf[..n], &mut voice);
                if voice != previous {
                    voice_sync.send(voice);
                }
            }
            // the ring buffer restarts itself after an overrun; whatever message was in progress resynchronizes on
            // the next status byte
            Either::First(Err(error)) => warn!("Error reading serial MIDI: {}", error),
            Either::Second(channel) => receiver.begin(channel),
        }
    }
}
