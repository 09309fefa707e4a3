//! Locator decoding
//!
//! Doxygen encodes a type's qualified name into its page file name:
//! `class_sharp_kmy_audio_1_1_sound.html` is the page for
//! `SharpKmyAudio.Sound`. This module reverses that encoding.

mod decode;

pub use decode::{decode_locator, DecodedName, LocatorScheme};
