#![no_main]

use libfuzzer_sys::fuzz_target;
use symexpr::expression::{ConstValue, Expression, Operator, SymType, ALL};

const OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "rem", "ite", ">", ">=", "<", "<=", "=", "!=", "cmp", "bvor", "bvand",
    "bvxor", "bvshl", "bvshr", "neg", "not", "and", "or", "toByte", "toChar", "toShort", "toInt",
    "toLong", "toFloat", "toDouble", "toBoolean", "put", "get",
];

fn leaf(byte: u8) -> Expression {
    let ty = ALL[usize::from(byte) % ALL.len()];
    match byte % 3 {
        0 => Expression::variable(format!("v{byte}"), ty),
        1 if ty == SymType::Heap => Expression::constant(ConstValue::empty_heap(), ty),
        1 if ty == SymType::Reference => Expression::constant(ConstValue::Address(byte.into()), ty),
        _ => Expression::constant(i64::from(byte), ty),
    }
}

// Builds operations bottom-up from arbitrary bytes. Construction may fail but must never panic.
fuzz_target!(|data: &[u8]| {
    let mut pool: Vec<Expression> = Vec::new();
    for chunk in data.chunks(4) {
        let [op, a, b, c] = match chunk {
            [op, a, b, c] => [*op, *a, *b, *c],
            _ => break,
        };
        let Ok(operator) = Operator::from_symbol(OPERATORS[usize::from(op) % OPERATORS.len()])
        else {
            continue;
        };

        let pick = |byte: u8| {
            if !pool.is_empty() && byte & 0x80 != 0 {
                pool[usize::from(byte) % pool.len()].clone()
            } else {
                leaf(byte)
            }
        };
        let count = usize::from(c) % 4;
        let children: Vec<_> = [a, b, c].into_iter().take(count).map(pick).collect();
        let hint = ALL[usize::from(a ^ b) % ALL.len()];

        if let Ok(expr) = Expression::operation_with_hint(operator, children, hint) {
            let _ = expr.to_string();
            pool.push(expr);
        }
    }
});
