//! Prints a handful of demonstration rMQR symbols to the console.
//! No extra dependencies beyond the base crate; run with no arguments.

use rmqrcode::{fit, EccLevel, FitStrategy, Mode, Symbol};

fn main() {
    env_logger::init();

    do_basic_demo();
    do_variety_demo();
    do_segment_demo();
    do_fit_demo();
}

fn do_basic_demo() {
    let mut symbol = Symbol::new("R13x99", EccLevel::M).unwrap();
    symbol.add_segment(Mode::Byte, "Hello, world!");
    symbol.make().unwrap();
    print_symbol(&symbol);
}

fn do_variety_demo() {
    let mut symbol = Symbol::new("R11x139", EccLevel::H).unwrap();
    symbol.add_segment(Mode::Numeric, "314159265358979323846264338327950288419716939937510");
    symbol.make().unwrap();
    print_symbol(&symbol);

    let mut symbol = Symbol::new("R17x139", EccLevel::M).unwrap();
    symbol.add_segment(Mode::Alphanumeric, "DOLLAR-AMOUNT:$39.87 PERCENTAGE:100.00%");
    symbol.make().unwrap();
    print_symbol(&symbol);
}

fn do_segment_demo() {
    let mut symbol = Symbol::new("R7x43", EccLevel::M).unwrap();
    symbol.add_segment(Mode::Numeric, "123");
    symbol.add_segment(Mode::Byte, "Abc");
    symbol.make().unwrap();
    print_symbol(&symbol);
}

fn do_fit_demo() {
    let symbol = fit("https://example.com/rmqr", EccLevel::M, FitStrategy::Balanced).unwrap();
    print_symbol(&symbol);
    println!("selected version: {}", symbol.version_name());
}

fn print_symbol(symbol: &Symbol) {
    let grid = symbol.to_grid(true);
    for row in &grid {
        for &cell in row {
            let c = if cell == 1 { '█' } else { ' ' };
            print!("{0}{0}", c);
        }
        println!();
    }
    println!();
}
