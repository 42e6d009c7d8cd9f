//! Conversion of notes into control voltage.
//!
//! The mapping is exponential: the voltage doubles with every octave, starting from [`BASE_VOLTAGE`] at note 0.

use measurements::Voltage;
use wmidi::Note;

/// Voltage produced for note 0 (C-1).
pub const BASE_VOLTAGE: f64 = 0.62;

/// `2^(n/12)` for each semitone of an octave.
const SEMITONE_RATIOS: [f64; 12] = [
    1.0,
    1.059_463_094_359_295_3,
    1.122_462_048_309_373,
    1.189_207_115_002_721,
    1.259_921_049_894_873_2,
    1.334_839_854_170_034_4,
    1.414_213_562_373_095_1,
    1.498_307_076_876_681_5,
    1.587_401_051_968_199_4,
    1.681_792_830_507_429,
    1.781_797_436_280_678_5,
    1.887_748_625_363_386_8,
];

/// Returns the control voltage for a [`Note`].
pub fn note_to_voltage(note: Note) -> Voltage {
    let n = u8::from(note);
    let octave_multiplier = f64::from(1_u16 << (n / 12));
    Voltage::from_volts(BASE_VOLTAGE * octave_multiplier * SEMITONE_RATIOS[usize::from(n % 12)])
}

/// Expresses `voltage` as an 8-bit fraction of `reference`, e.g., a PWM duty cycle.
///
/// Voltages outside `0..=reference` saturate at 0 and 255 respectively.
pub fn duty_cycle(voltage: Voltage, reference: Voltage) -> u8 {
    let fraction = voltage.as_volts() / reference.as_volts();
    // float to int casts saturate, and NaN becomes 0
    (fraction * f64::from(u8::MAX)) as u8
}
