use crate::metadata::pool::{CompositeRef, ConstantPool, ConstantPoolBuilder};

/// Handles of the symbols added by [`described_pool`]
pub struct DescribedHandles {
    pub name: u16,
    pub descriptor: u16,
    pub signature: u16,
}

// Pool with the three symbols of one generic list parameter
pub fn described_pool() -> (ConstantPool, DescribedHandles) {
    let mut builder = ConstantPoolBuilder::new();
    let handles = DescribedHandles {
        name: builder.utf8("items").unwrap(),
        descriptor: builder.utf8("Ljava/util/List;").unwrap(),
        signature: builder
            .utf8("Ljava/util/List<Ljava/lang/String;>;")
            .unwrap(),
    };
    (builder.build(), handles)
}

// 10 = MethodRef(high=20, low=0), 20 = NameAndType(high=0, low=30), 30 = "x"
pub fn accessor_chain_pool() -> ConstantPool {
    let mut builder = ConstantPoolBuilder::new();
    builder
        .set_method_ref(10, CompositeRef::new(20, 0))
        .unwrap();
    builder
        .set_name_and_type(20, CompositeRef::new(0, 30))
        .unwrap();
    builder.set_utf8(30, "x").unwrap();
    builder.build()
}

// Adds a complete accessor chain for `name` on `class`, returning the method ref handle
pub fn add_accessor(builder: &mut ConstantPoolBuilder, class: u16, name: &str) -> u16 {
    let name = builder.utf8(name).unwrap();
    let descriptor = builder.utf8("()I").unwrap();
    let name_and_type = builder.name_and_type(name, descriptor).unwrap();
    builder.method_ref(class, name_and_type).unwrap()
}
