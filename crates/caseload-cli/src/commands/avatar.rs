use caseload_core::util::avatar::{avatar_index, avatar_variant, string_hash};

pub fn run(id: &str) {
    println!("id:      {}", id);
    println!("hash:    {}", string_hash(id));
    println!("index:   {}", avatar_index(id));
    println!("variant: {}", avatar_variant(id));
}
