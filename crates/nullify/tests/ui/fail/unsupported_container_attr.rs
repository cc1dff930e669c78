use nullify::Describe;

#[derive(Describe)]
#[describe(tag = "x")]
struct Test {
    value: u32,
}

fn main() {}
