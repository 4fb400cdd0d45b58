use core::fmt;

bitflags::bitflags! {
    /// Static type tag declared by a function for the value it produces.
    ///
    /// Tags form a set so that a function may declare a union (e.g. a
    /// function returning either a number or a string). A child satisfies
    /// a requirement when the two sets intersect, which makes [`ReturnType::ANY`]
    /// acceptable everywhere.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ReturnType: u8 {
        const BOOLEAN = 1;
        const NUMBER = 1 << 1;
        const OBJECT = 1 << 2;
        const STRING = 1 << 3;
        const ARRAY = 1 << 4;
        const ANY = Self::BOOLEAN.bits()
            | Self::NUMBER.bits()
            | Self::OBJECT.bits()
            | Self::STRING.bits()
            | Self::ARRAY.bits();
    }
}

impl ReturnType {
    /// Whether a child declared as `self` may be used where `required` is expected.
    pub fn satisfies(self, required: ReturnType) -> bool {
        self.intersects(required)
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == ReturnType::ANY {
            return write!(f, "any");
        }
        if self.is_empty() {
            return write!(f, "nothing");
        }
        let names = [
            (ReturnType::BOOLEAN, "boolean"),
            (ReturnType::NUMBER, "number"),
            (ReturnType::OBJECT, "object"),
            (ReturnType::STRING, "string"),
            (ReturnType::ARRAY, "array"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    write!(f, " | ")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}
