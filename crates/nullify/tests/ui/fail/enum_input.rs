use nullify::Describe;

#[derive(Describe)]
enum Test {
    Value(u32),
}

fn main() {}
