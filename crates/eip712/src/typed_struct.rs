use {
    crate::{EncodedField, EncodingError, FieldValue, StructHash, TypeHash, TypeSignature},
    tracing::instrument,
};

/// A named and typed struct member.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypedField {
    /// Solidity type as it appears in the type signature, e.g. `bytes32[]`.
    pub ty: String,
    pub name: String,
    pub value: FieldValue,
}

impl TypedField {
    pub fn new(ty: impl Into<String>, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A struct instance whose type signature and encoded data are both derived
/// from the same ordered member list.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TypedStruct {
    pub name: String,
    pub fields: Vec<TypedField>,
    /// Signatures of the struct types referenced by members, in the order
    /// they get appended to the type signature.
    pub referenced: Vec<TypeSignature>,
}

impl TypedStruct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn field(
        mut self,
        ty: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.fields.push(TypedField::new(ty, name, value));
        self
    }

    pub fn referencing(mut self, signature: TypeSignature) -> Self {
        self.referenced.push(signature);
        self
    }

    pub fn signature(&self) -> TypeSignature {
        let signature = TypeSignature::new(
            &self.name,
            self.fields
                .iter()
                .map(|field| (field.ty.as_str(), field.name.as_str())),
        );
        self.referenced
            .iter()
            .fold(signature, |signature, referenced| {
                signature.with_referenced(referenced)
            })
    }

    pub fn type_hash(&self) -> TypeHash {
        crate::type_hash(&self.signature())
    }

    pub fn encode_fields(&self) -> Result<Vec<EncodedField>, EncodingError> {
        self.fields
            .iter()
            .map(|field| {
                field.value.encode().map_err(|err| EncodingError::Field {
                    name: field.name.clone(),
                    source: Box::new(err),
                })
            })
            .collect()
    }

    #[instrument(skip_all, fields(name = %self.name))]
    pub fn hash_struct(&self) -> Result<StructHash, EncodingError> {
        let fields = self.encode_fields()?;
        let hash = crate::hash_struct(&self.type_hash(), &fields)?;
        tracing::trace!(signature = %self.signature(), %hash, "hashed struct");
        Ok(hash)
    }
}
