/// Contains some helper methods to manipulate bits of a 32-bit word,
/// the index (`bit_idx`) is supposed to be from lsb to msb (right to left)
pub trait Bits: Copy {
    fn is_bit_on(&self, bit_idx: u8) -> bool;

    fn set_bit_on(&mut self, bit_idx: u8);

    fn set_bit_off(&mut self, bit_idx: u8);

    fn is_bit_off(&self, bit_idx: u8) -> bool {
        !self.is_bit_on(bit_idx)
    }

    fn set_bit(&mut self, bit_idx: u8, value: bool) {
        if value {
            self.set_bit_on(bit_idx);
        } else {
            self.set_bit_off(bit_idx);
        }
    }

    fn get_bit(&self, bit_idx: u8) -> bool {
        self.is_bit_on(bit_idx)
    }
}

impl Bits for u32 {
    fn is_bit_on(&self, bit_idx: u8) -> bool {
        debug_assert!(bit_idx < 32);
        (self >> bit_idx) & 1 == 1
    }

    fn set_bit_on(&mut self, bit_idx: u8) {
        debug_assert!(bit_idx < 32);
        *self |= 1 << bit_idx;
    }

    fn set_bit_off(&mut self, bit_idx: u8) {
        debug_assert!(bit_idx < 32);
        *self &= !(1 << bit_idx);
    }
}
