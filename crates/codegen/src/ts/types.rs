//! TypeScript IR types for code generation.

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, any, undefined
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Object type: { foo: string; bar?: number }
    Object(Vec<TsProp>),
    /// Named type reference: "User", "Widget"
    Ref(String),
    /// Type expression taken verbatim from an override mapping
    Raw(String),
}

impl TsType {
    /// `any`
    pub fn any() -> Self {
        TsType::Primitive(TsPrimitive::Any)
    }

    /// `undefined`
    pub fn undefined() -> Self {
        TsType::Primitive(TsPrimitive::Undefined)
    }

    /// `item[]`
    pub fn array(item: TsType) -> Self {
        TsType::Array(Box::new(item))
    }
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `any`
    Any,
    /// `undefined`
    Undefined,
}

/// Object property definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    /// Property key, emitted verbatim.
    pub name: String,
    /// Property type.
    pub ty: TsType,
    /// Emitted as `name?:`.
    pub optional: bool,
}

impl TsProp {
    /// Non-optional property.
    pub fn required(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }
}

/// Type definition kind
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefKind {
    /// type Foo = { ... } with one property per line
    Structural {
        /// Properties in declaration order.
        properties: Vec<TsProp>,
    },
    /// type Foo = ...
    Alias {
        /// Aliased type.
        ty: TsType,
    },
}

/// Type definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsTypeDef {
    /// Exported type name.
    pub name: String,
    /// Body of the declaration.
    pub kind: TypeDefKind,
}
