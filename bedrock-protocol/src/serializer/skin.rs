use std::io::{Read, Write};

use bedrock_data::version::{
    PROTOCOL_1_16_100, PROTOCOL_1_16_210, PROTOCOL_1_17_30,
};
use bytes::Bytes;

use super::{ProtocolReader, ProtocolWriter};
use crate::ser::{NetworkRead, NetworkWrite, ReadingError, WritingError};

/// Upper bound on the animation / persona piece / tint color counts a
/// peer may declare. The counts are 32-bit on the wire but real skins
/// carry a handful of entries.
const MAX_SKIN_LIST_LENGTH: i32 = 1024;

/// A raw RGBA pixel rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkinImage {
    pub width: u32,
    pub height: u32,
    pub data: Bytes,
}

impl SkinImage {
    pub fn new(width: u32, height: u32, data: Bytes) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Reconstructs an image from a bare pre-1.13.0 pixel blob, whose
    /// dimensions were implied by its length. An empty blob is a valid
    /// "no image" marker (used for capes).
    pub fn from_legacy(data: Bytes) -> Result<Self, String> {
        let (width, height) = match data.len() {
            0 => (0, 0),
            8192 => (64, 32),
            16384 => (64, 64),
            65536 => (128, 128),
            n => return Err(format!("invalid legacy skin data size {n}")),
        };
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkinAnimation {
    pub image: SkinImage,
    pub animation_type: i32,
    pub frames: f32,
    /// Only serialized for protocol >= 1.16.100; 0 below.
    pub expression_type: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonaSkinPiece {
    pub piece_id: String,
    pub piece_type: String,
    pub pack_id: String,
    pub is_default: bool,
    pub product_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonaPieceTintColor {
    pub piece_type: String,
    pub colors: Vec<String>,
}

/// The full skin blob carried by player-list additions. `get_skin`
/// returns it complete; only `verified` is owned by a later band of the
/// player-list packet and defaults to trusted here.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinData {
    pub skin_id: String,
    /// Absent on the wire below 1.16.210.
    pub play_fab_id: String,
    pub resource_patch: String,
    pub skin_image: SkinImage,
    pub animations: Vec<SkinAnimation>,
    pub cape_image: SkinImage,
    pub geometry_data: String,
    /// Absent on the wire below 1.17.30.
    pub geometry_data_engine_version: String,
    pub animation_data: String,
    pub premium: bool,
    pub persona: bool,
    pub cape_on_classic: bool,
    pub cape_id: String,
    pub full_skin_id: String,
    /// The persona fields below are absent on the wire below 1.16.100.
    pub arm_size: String,
    pub skin_color: String,
    pub persona_pieces: Vec<PersonaSkinPiece>,
    pub piece_tint_colors: Vec<PersonaPieceTintColor>,
    pub verified: bool,
}

impl Default for SkinData {
    fn default() -> Self {
        Self {
            skin_id: String::new(),
            play_fab_id: String::new(),
            resource_patch: String::new(),
            skin_image: SkinImage::default(),
            animations: Vec::new(),
            cape_image: SkinImage::default(),
            geometry_data: String::new(),
            geometry_data_engine_version: String::new(),
            animation_data: String::new(),
            premium: false,
            persona: false,
            cape_on_classic: false,
            cape_id: String::new(),
            full_skin_id: String::new(),
            arm_size: String::new(),
            skin_color: String::new(),
            persona_pieces: Vec::new(),
            piece_tint_colors: Vec::new(),
            verified: true,
        }
    }
}

fn get_bounded_l_int_count(read: &mut impl NetworkRead, what: &str) -> Result<i32, ReadingError> {
    let count = read.get_i32_le()?;
    if !(0..=MAX_SKIN_LIST_LENGTH).contains(&count) {
        return Err(ReadingError::TooLarge(what.to_string()));
    }
    Ok(count)
}

impl<R: Read> ProtocolReader<R> {
    fn get_skin_image(&mut self) -> Result<SkinImage, ReadingError> {
        let width = self.get_i32_le()?;
        let height = self.get_i32_le()?;
        if width < 0 || height < 0 {
            return Err(ReadingError::Message(
                "negative skin image dimension".to_string(),
            ));
        }
        let data = self.get_byte_array()?;
        Ok(SkinImage::new(width as u32, height as u32, data))
    }

    /// Reads a complete [`SkinData`] for protocol >= 1.13.0. Older
    /// protocols never carry this shape; their player-list entries use the
    /// legacy five-string form instead.
    pub fn get_skin(&mut self) -> Result<SkinData, ReadingError> {
        let protocol = self.protocol_id();

        let skin_id = self.get_string()?;
        let play_fab_id = if protocol >= PROTOCOL_1_16_210 {
            self.get_string()?
        } else {
            String::new()
        };
        let resource_patch = self.get_string()?;
        let skin_image = self.get_skin_image()?;

        let animation_count = get_bounded_l_int_count(self, "skin animation list")?;
        let mut animations = Vec::with_capacity(animation_count as usize);
        for _ in 0..animation_count {
            let image = self.get_skin_image()?;
            let animation_type = self.get_i32_le()?;
            let frames = self.get_f32_le()?;
            let expression_type = if protocol >= PROTOCOL_1_16_100 {
                self.get_i32_le()?
            } else {
                0
            };
            animations.push(SkinAnimation {
                image,
                animation_type,
                frames,
                expression_type,
            });
        }

        let cape_image = self.get_skin_image()?;
        let geometry_data = self.get_string()?;
        let geometry_data_engine_version = if protocol >= PROTOCOL_1_17_30 {
            self.get_string()?
        } else {
            String::new()
        };
        let animation_data = self.get_string()?;
        let premium = self.get_bool()?;
        let persona = self.get_bool()?;
        let cape_on_classic = self.get_bool()?;
        let cape_id = self.get_string()?;
        let full_skin_id = self.get_string()?;

        let mut skin = SkinData {
            skin_id,
            play_fab_id,
            resource_patch,
            skin_image,
            animations,
            cape_image,
            geometry_data,
            geometry_data_engine_version,
            animation_data,
            premium,
            persona,
            cape_on_classic,
            cape_id,
            full_skin_id,
            ..SkinData::default()
        };

        if protocol >= PROTOCOL_1_16_100 {
            skin.arm_size = self.get_string()?;
            skin.skin_color = self.get_string()?;

            let piece_count = get_bounded_l_int_count(self, "persona piece list")?;
            for _ in 0..piece_count {
                skin.persona_pieces.push(PersonaSkinPiece {
                    piece_id: self.get_string()?,
                    piece_type: self.get_string()?,
                    pack_id: self.get_string()?,
                    is_default: self.get_bool()?,
                    product_id: self.get_string()?,
                });
            }

            let tint_count = get_bounded_l_int_count(self, "piece tint color list")?;
            for _ in 0..tint_count {
                let piece_type = self.get_string()?;
                let color_count = get_bounded_l_int_count(self, "tint color list")?;
                let mut colors = Vec::with_capacity(color_count as usize);
                for _ in 0..color_count {
                    colors.push(self.get_string()?);
                }
                skin.piece_tint_colors.push(PersonaPieceTintColor {
                    piece_type,
                    colors,
                });
            }
        }

        Ok(skin)
    }
}

impl<W: Write> ProtocolWriter<W> {
    fn put_skin_image(&mut self, image: &SkinImage) -> Result<(), WritingError> {
        self.write_i32_le(image.width as i32)?;
        self.write_i32_le(image.height as i32)?;
        self.write_byte_array(&image.data)
    }

    pub fn put_skin(&mut self, skin: &SkinData) -> Result<(), WritingError> {
        let protocol = self.protocol_id();

        self.write_string(&skin.skin_id)?;
        if protocol >= PROTOCOL_1_16_210 {
            self.write_string(&skin.play_fab_id)?;
        }
        self.write_string(&skin.resource_patch)?;
        self.put_skin_image(&skin.skin_image)?;

        self.write_i32_le(skin.animations.len() as i32)?;
        for animation in &skin.animations {
            self.put_skin_image(&animation.image)?;
            self.write_i32_le(animation.animation_type)?;
            self.write_f32_le(animation.frames)?;
            if protocol >= PROTOCOL_1_16_100 {
                self.write_i32_le(animation.expression_type)?;
            }
        }

        self.put_skin_image(&skin.cape_image)?;
        self.write_string(&skin.geometry_data)?;
        if protocol >= PROTOCOL_1_17_30 {
            self.write_string(&skin.geometry_data_engine_version)?;
        }
        self.write_string(&skin.animation_data)?;
        self.write_bool(skin.premium)?;
        self.write_bool(skin.persona)?;
        self.write_bool(skin.cape_on_classic)?;
        self.write_string(&skin.cape_id)?;
        self.write_string(&skin.full_skin_id)?;

        if protocol >= PROTOCOL_1_16_100 {
            self.write_string(&skin.arm_size)?;
            self.write_string(&skin.skin_color)?;

            self.write_i32_le(skin.persona_pieces.len() as i32)?;
            for piece in &skin.persona_pieces {
                self.write_string(&piece.piece_id)?;
                self.write_string(&piece.piece_type)?;
                self.write_string(&piece.pack_id)?;
                self.write_bool(piece.is_default)?;
                self.write_string(&piece.product_id)?;
            }

            self.write_i32_le(skin.piece_tint_colors.len() as i32)?;
            for tint in &skin.piece_tint_colors {
                self.write_string(&tint.piece_type)?;
                self.write_i32_le(tint.colors.len() as i32)?;
                for color in &tint.colors {
                    self.write_string(color)?;
                }
            }
        }

        Ok(())
    }
}
