//! Conversion of arbitrary `Serialize` values to Elisp.
//!
//! This is the dynamically-typed counterpart of [`ToElisp`](crate::ToElisp):
//! the accepted domain is the same, but it is checked at runtime, so values
//! outside it (byte strings, structs, enum variants) are reported as
//! [`ElispError::UnsupportedType`] instead of being coerced.

use serde::Serialize;
use serde::ser::{self, Impossible};
use tracing::debug;

use crate::builders::{make_alist_with, make_plist_with};
use crate::convert::{ConvertOptions, DictFormat};
use crate::error::ElispError;
use crate::expr::{Expr, Literal, Symbol};

/// Convert any serializable value to Elisp using default options.
pub fn to_elisp_value<T: Serialize + ?Sized>(value: &T) -> Result<Expr, ElispError> {
    to_elisp_value_with(value, &ConvertOptions::default())
}

/// Convert any serializable value to Elisp.
///
/// Sequences become quoted lists, tuples and tuple structs unquoted lists,
/// and maps alists or plists depending on `options.dict_format`.
pub fn to_elisp_value_with<T: Serialize + ?Sized>(
    value: &T,
    options: &ConvertOptions,
) -> Result<Expr, ElispError> {
    value.serialize(ExprSerializer { options })
}

fn unsupported<T>(type_name: impl Into<String>) -> Result<T, ElispError> {
    let type_name = type_name.into();
    debug!(type_name = %type_name, "rejecting value outside the Elisp conversion domain");
    Err(ElispError::UnsupportedType(type_name))
}

#[derive(Clone, Copy)]
struct ExprSerializer<'a> {
    options: &'a ConvertOptions,
}

impl<'a> ser::Serializer for ExprSerializer<'a> {
    type Ok = Expr;
    type Error = ElispError;

    type SerializeSeq = SeqSerializer<'a>;
    type SerializeTuple = SeqSerializer<'a>;
    type SerializeTupleStruct = SeqSerializer<'a>;
    type SerializeTupleVariant = Impossible<Expr, ElispError>;
    type SerializeMap = MapSerializer<'a>;
    type SerializeStruct = Impossible<Expr, ElispError>;
    type SerializeStructVariant = Impossible<Expr, ElispError>;

    fn serialize_bool(self, v: bool) -> Result<Expr, ElispError> {
        Ok(crate::el_bool(v).into())
    }

    fn serialize_i8(self, v: i8) -> Result<Expr, ElispError> {
        Ok(Expr::integer(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Expr, ElispError> {
        Ok(Expr::integer(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Expr, ElispError> {
        Ok(Expr::integer(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Expr, ElispError> {
        Ok(Expr::integer(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Expr, ElispError> {
        Ok(Expr::integer(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Expr, ElispError> {
        Ok(Expr::integer(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Expr, ElispError> {
        Ok(Expr::integer(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Expr, ElispError> {
        Ok(Expr::integer(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Expr, ElispError> {
        Ok(Expr::integer(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Expr, ElispError> {
        i128::try_from(v)
            .map(Expr::integer)
            .map_err(|_| ElispError::IntegerOutOfRange(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Expr, ElispError> {
        Ok(Expr::float(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Expr, ElispError> {
        Ok(Expr::float(v))
    }

    fn serialize_char(self, v: char) -> Result<Expr, ElispError> {
        Ok(Expr::string(v))
    }

    fn serialize_str(self, v: &str) -> Result<Expr, ElispError> {
        Ok(Expr::string(v))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Expr, ElispError> {
        unsupported("bytes")
    }

    fn serialize_none(self) -> Result<Expr, ElispError> {
        Ok(Symbol::nil().into())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Expr, ElispError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Expr, ElispError> {
        Ok(Symbol::nil().into())
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Expr, ElispError> {
        unsupported(name)
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Expr, ElispError> {
        unsupported(format!("{}::{}", name, variant))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Expr, ElispError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Expr, ElispError> {
        unsupported(format!("{}::{}", name, variant))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqSerializer<'a>, ElispError> {
        Ok(SeqSerializer::new(self.options, len, true))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqSerializer<'a>, ElispError> {
        Ok(SeqSerializer::new(self.options, Some(len), false))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqSerializer<'a>, ElispError> {
        Ok(SeqSerializer::new(self.options, Some(len), false))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, ElispError> {
        unsupported(format!("{}::{}", name, variant))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapSerializer<'a>, ElispError> {
        Ok(MapSerializer {
            options: self.options,
            pairs: Vec::with_capacity(len.unwrap_or(0)),
            key: None,
        })
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, ElispError> {
        unsupported(name)
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, ElispError> {
        unsupported(format!("{}::{}", name, variant))
    }
}

struct SeqSerializer<'a> {
    options: &'a ConvertOptions,
    items: Vec<Expr>,
    quote: bool,
}

impl<'a> SeqSerializer<'a> {
    fn new(options: &'a ConvertOptions, len: Option<usize>, quote: bool) -> Self {
        SeqSerializer {
            options,
            items: Vec::with_capacity(len.unwrap_or(0)),
            quote,
        }
    }

    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ElispError> {
        let item = value.serialize(ExprSerializer {
            options: self.options,
        })?;
        self.items.push(item);
        Ok(())
    }

    fn finish(self) -> Expr {
        let list = Expr::list(self.items);
        if self.quote { list.quote() } else { list }
    }
}

impl ser::SerializeSeq for SeqSerializer<'_> {
    type Ok = Expr;
    type Error = ElispError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ElispError> {
        self.push(value)
    }

    fn end(self) -> Result<Expr, ElispError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SeqSerializer<'_> {
    type Ok = Expr;
    type Error = ElispError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ElispError> {
        self.push(value)
    }

    fn end(self) -> Result<Expr, ElispError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SeqSerializer<'_> {
    type Ok = Expr;
    type Error = ElispError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ElispError> {
        self.push(value)
    }

    fn end(self) -> Result<Expr, ElispError> {
        Ok(self.finish())
    }
}

struct MapSerializer<'a> {
    options: &'a ConvertOptions,
    pairs: Vec<(Expr, Expr)>,
    key: Option<Expr>,
}

impl ser::SerializeMap for MapSerializer<'_> {
    type Ok = Expr;
    type Error = ElispError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), ElispError> {
        let key = key.serialize(ExprSerializer {
            options: self.options,
        })?;
        // String keys name symbols; anything else keeps its converted form.
        let key = match key {
            Expr::Literal(Literal::String(name)) => Symbol::new(name).into(),
            other => other,
        };
        self.key = Some(key);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ElispError> {
        let key = self
            .key
            .take()
            .ok_or_else(|| ElispError::Custom("map value serialized before its key".into()))?;
        let value = value.serialize(ExprSerializer {
            options: self.options,
        })?;
        self.pairs.push((key, value));
        Ok(())
    }

    fn end(self) -> Result<Expr, ElispError> {
        Ok(match self.options.dict_format {
            DictFormat::Alist => make_alist_with(self.pairs, false, self.options),
            DictFormat::Plist => make_plist_with(self.pairs, false, self.options),
        })
    }
}
