use std::mem;

use crate::{
    ast::{BinaryOperator, Expr, LiteralValue, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        environment::Scope,
        evaluator::core::{EvalResult, Interpreter, Signal},
        value::{Callable, Payload, Value},
    },
    types::Type,
};

impl Interpreter {
    /// Evaluates an expression to a value.
    ///
    /// # Errors
    /// Propagates the first runtime error.
    pub(in crate::interpreter::evaluator) fn eval(&mut self, expression: &Expr) -> EvalResult<Value> {
        match expression {
            Expr::Literal { value, .. } => Ok(match value {
                LiteralValue::Number(number) => Value::float(*number),
                LiteralValue::String(string) => Value::string(string.clone()),
                LiteralValue::Bool(boolean) => Value::boolean(*boolean),
            }),
            Expr::Variable { name, line } => Scope::get(&self.scope, name, *line),
            Expr::Unary { op, operand, line } => self.eval_unary(*op, operand, *line),
            Expr::Binary { left,
                           op,
                           right,
                           line, } => self.eval_binary(left, *op, right, *line),
            Expr::Call { name,
                         arguments,
                         line, } => {
                let (value, return_type) = self.invoke(name, arguments, *line)?;

                // In expression position the result is about to be used, so
                // it must satisfy the declared return type; a body that fell
                // through produced void and fails here.
                if value.ty.matches(&return_type) {
                    Ok(value)
                } else {
                    Err(RuntimeError::TypeMismatch { expected: return_type.to_string(),
                                                     found: value.ty.to_string(),
                                                     line: *line })
                }
            },
            Expr::Array { elements, line } => self.eval_array(elements, *line),
        }
    }

    /// Applies a unary operator.
    fn eval_unary(&mut self, op: UnaryOperator, operand: &Expr, line: usize) -> EvalResult<Value> {
        let value = self.eval(operand)?;

        match (op, &value.payload) {
            (UnaryOperator::Negate, Payload::Float(number)) => Ok(Value::float(-number)),
            (UnaryOperator::Negate, _) => {
                Err(RuntimeError::UnsupportedUnaryOperator { operator: op.to_string(),
                                                             operand: value.ty.to_string(),
                                                             line })
            },
        }
    }

    /// Applies a binary operator.
    ///
    /// Both operands are evaluated before the operator is checked. `+` is
    /// addition on floats and concatenation on strings; `==` and `!=`
    /// require the operand types to match in both directions and compare
    /// arrays and functions by identity.
    fn eval_binary(&mut self,
                   left: &Expr,
                   op: BinaryOperator,
                   right: &Expr,
                   line: usize)
                   -> EvalResult<Value> {
        let left = self.eval(left)?;
        let right = self.eval(right)?;

        match op {
            BinaryOperator::Or | BinaryOperator::And => {
                match (&left.payload, &right.payload) {
                    (Payload::Bool(first), Payload::Bool(second)) => {
                        Ok(Value::boolean(if op == BinaryOperator::Or {
                                              *first || *second
                                          } else {
                                              *first && *second
                                          }))
                    },
                    _ => Err(unsupported(op, &left, &right, line)),
                }
            },
            BinaryOperator::Equal | BinaryOperator::NotEqual => {
                if left.ty.matches(&right.ty) && right.ty.matches(&left.ty) {
                    let equal = left.payload == right.payload;

                    Ok(Value::boolean(if op == BinaryOperator::Equal {
                                          equal
                                      } else {
                                          !equal
                                      }))
                } else {
                    Err(unsupported(op, &left, &right, line))
                }
            },
            BinaryOperator::Add => match (&left.payload, &right.payload) {
                (Payload::Float(first), Payload::Float(second)) => {
                    Ok(Value::float(first + second))
                },
                (Payload::String(first), Payload::String(second)) => {
                    Ok(Value::string(format!("{first}{second}")))
                },
                _ => Err(unsupported(op, &left, &right, line)),
            },
            BinaryOperator::Sub | BinaryOperator::Mul | BinaryOperator::Div => {
                match (&left.payload, &right.payload) {
                    (Payload::Float(first), Payload::Float(second)) => {
                        Ok(Value::float(match op {
                               BinaryOperator::Sub => first - second,
                               BinaryOperator::Mul => first * second,
                               _ => first / second,
                           }))
                    },
                    _ => Err(unsupported(op, &left, &right, line)),
                }
            },
        }
    }

    /// Evaluates an array literal.
    ///
    /// The declared element type is taken from the first element; the other
    /// elements are not checked against it, so a mixed literal is only
    /// rejected once something uses the array at its declared type.
    fn eval_array(&mut self, elements: &[Expr], line: usize) -> EvalResult<Value> {
        let mut values = Vec::with_capacity(elements.len());

        for element in elements {
            values.push(self.eval(element)?);
        }

        let Some(first) = values.first() else {
            return Err(RuntimeError::EmptyArrayLiteral { line });
        };
        let element_type = first.ty.clone();

        Ok(Value::array(values, element_type))
    }

    /// Resolves `name` and calls it with `arguments`.
    ///
    /// The call checks arity and then each argument against its parameter
    /// type. A declared function runs in a fresh child of its captured
    /// scope, never of the caller's; each parameter is bound with the
    /// argument's runtime type, so an `object` parameter keeps the concrete
    /// type it received. An explicit `return` value is checked against the
    /// declared return type here; a fall-through produces `void` unchecked,
    /// which only the expression-position check in [`Self::eval`] rejects.
    ///
    /// # Returns
    /// The produced value together with the declared return type, which the
    /// caller may or may not check.
    ///
    /// # Errors
    /// - [`RuntimeError::NotCallable`] if `name` is not bound to a function.
    /// - [`RuntimeError::ArityMismatch`] on an argument count mismatch.
    /// - [`RuntimeError::TypeMismatch`] if an argument fails its parameter
    ///   type.
    /// - [`RuntimeError::IllegalControlFlow`] if a `break` escapes the body.
    pub(in crate::interpreter::evaluator) fn invoke(&mut self,
                                                    name: &str,
                                                    arguments: &[Expr],
                                                    line: usize)
                                                    -> EvalResult<(Value, Type)> {
        let callee = Scope::get(&self.scope, name, line)?;

        let (callable, return_type, parameter_types) = match (&callee.payload, &callee.ty) {
            (Payload::Function(callable),
             Type::Function { return_type,
                              parameter_types, }) => {
                (callable.clone(), (**return_type).clone(), parameter_types.clone())
            },
            _ => {
                return Err(RuntimeError::NotCallable { name: name.to_string(),
                                                       line });
            },
        };

        if parameter_types.len() != arguments.len() {
            return Err(RuntimeError::ArityMismatch { expected: parameter_types.len(),
                                                     found: arguments.len(),
                                                     line });
        }

        let mut values = Vec::with_capacity(arguments.len());

        for (argument, expected) in arguments.iter().zip(&parameter_types) {
            let value = self.eval(argument)?;

            if !value.ty.matches(expected) {
                return Err(RuntimeError::TypeMismatch { expected: expected.to_string(),
                                                        found: value.ty.to_string(),
                                                        line: argument.line_number() });
            }

            values.push(value);
        }

        match callable {
            Callable::Builtin(function) => Ok((function(&values, line)?, return_type)),
            Callable::Declared { declaration, closure } => {
                let call_scope = Scope::child(&closure);

                for (parameter, value) in declaration.parameters.iter().zip(values) {
                    let ty = value.ty.clone();

                    Scope::declare(&call_scope, &parameter.name, ty, value, false, line)?;
                }

                let saved = mem::replace(&mut self.scope, call_scope);
                let outcome = self.exec_sequence(&declaration.body);
                self.scope = saved;

                match outcome? {
                    Some(Signal::Return { value, line }) => {
                        // An explicit return must satisfy the declared return
                        // type even when the caller discards the result.
                        if value.ty.matches(&return_type) {
                            Ok((value, return_type))
                        } else {
                            Err(RuntimeError::TypeMismatch { expected: return_type.to_string(),
                                                             found: value.ty.to_string(),
                                                             line })
                        }
                    },
                    Some(Signal::Break { line }) => {
                        Err(RuntimeError::IllegalControlFlow { details: "'break' can only be used inside a loop.".to_string(),
                                                               line })
                    },
                    None => Ok((Value::void(), return_type)),
                }
            },
        }
    }
}

/// Builds the error for an operator applied to operand types it does not
/// support.
fn unsupported(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> RuntimeError {
    RuntimeError::UnsupportedOperator { operator: op.to_string(),
                                        left: left.ty.to_string(),
                                        right: right.ty.to_string(),
                                        line }
}
