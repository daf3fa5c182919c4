use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionDecl, IfClause, Statement},
    interpreter::{
        environment::Scope,
        evaluator::core::{EvalResult, Interpreter, Signal},
        value::{Callable, Value},
    },
    types::Type,
};

impl Interpreter {
    /// Executes a single statement.
    ///
    /// # Returns
    /// `None` when execution ran to completion, or the [`Signal`] raised by
    /// a `return` or `break` that this statement could not absorb.
    ///
    /// # Errors
    /// Propagates the first runtime error.
    pub(in crate::interpreter::evaluator) fn exec(&mut self,
                                                  statement: &Statement)
                                                  -> EvalResult<Option<Signal>> {
        match statement {
            Statement::Block { statements, .. } => self.exec_block(statements),
            Statement::VariableDeclaration { name,
                                             ty,
                                             value,
                                             is_constant,
                                             line, } => {
                let value = self.eval(value)?;
                let declared = ty.clone().unwrap_or_else(|| value.ty.clone());

                Scope::declare(&self.scope, name, declared, value, *is_constant, *line)?;
                Ok(None)
            },
            Statement::Assignment { name, value, line } => {
                let value = self.eval(value)?;

                Scope::set(&self.scope, name, value, *line)?;
                Ok(None)
            },
            Statement::If { clauses, else_body, .. } => self.exec_if(clauses, else_body.as_deref()),
            Statement::While { condition, body, .. } => self.exec_while(condition, body),
            Statement::For { variable,
                             lower,
                             upper,
                             body,
                             line, } => self.exec_for(variable, lower, upper, body, *line),
            Statement::Return { value, line } => {
                let value = match value {
                    Some(expression) => self.eval(expression)?,
                    None => Value::void(),
                };

                Ok(Some(Signal::Return { value, line: *line }))
            },
            Statement::Break { line } => Ok(Some(Signal::Break { line: *line })),
            Statement::Function(declaration) => self.exec_function(declaration),
            Statement::Call { name,
                              arguments,
                              line, } => {
                // A call statement discards the result, so the declared
                // return type is not checked against it.
                self.invoke(name, arguments, *line)?;
                Ok(None)
            },
        }
    }

    /// Executes the statements of a block in a fresh child scope.
    ///
    /// The previous scope is restored afterwards regardless of outcome, so
    /// block-local bindings never leak.
    pub(in crate::interpreter::evaluator) fn exec_block(&mut self,
                                                        statements: &[Statement])
                                                        -> EvalResult<Option<Signal>> {
        let saved = Rc::clone(&self.scope);
        self.scope = Scope::child(&saved);

        let outcome = self.exec_sequence(statements);
        self.scope = saved;

        outcome
    }

    /// Executes statements in order, stopping at the first signal or error.
    pub(in crate::interpreter::evaluator) fn exec_sequence(&mut self,
                                                           statements: &[Statement])
                                                           -> EvalResult<Option<Signal>> {
        for statement in statements {
            if let Some(signal) = self.exec(statement)? {
                return Ok(Some(signal));
            }
        }

        Ok(None)
    }

    /// Executes the first clause whose condition is true, or the `else` body
    /// when every condition is false.
    fn exec_if(&mut self,
               clauses: &[IfClause],
               else_body: Option<&Statement>)
               -> EvalResult<Option<Signal>> {
        for clause in clauses {
            let condition = self.eval(&clause.condition)?;

            if condition.as_bool(clause.condition.line_number())? {
                return self.exec(&clause.body);
            }
        }

        match else_body {
            Some(body) => self.exec(body),
            None => Ok(None),
        }
    }

    /// Executes a `while` loop.
    ///
    /// `break` stops the loop and is absorbed here; `return` keeps
    /// travelling outward.
    fn exec_while(&mut self, condition: &Expr, body: &Statement)
                  -> EvalResult<Option<Signal>> {
        loop {
            let value = self.eval(condition)?;

            if !value.as_bool(condition.line_number())? {
                return Ok(None);
            }

            match self.exec(body)? {
                Some(Signal::Break { .. }) => return Ok(None),
                Some(signal @ Signal::Return { .. }) => return Ok(Some(signal)),
                None => {},
            }
        }
    }

    /// Executes a `for` loop over an inclusive numeric range.
    ///
    /// The iterator variable is declared once, in a scope that belongs to
    /// the loop itself, and reassigned before each iteration. Both bounds
    /// are evaluated once, up front.
    fn exec_for(&mut self,
                variable: &str,
                lower: &Expr,
                upper: &Expr,
                body: &Statement,
                line: usize)
                -> EvalResult<Option<Signal>> {
        let lower_bound = self.eval(lower)?.as_float(lower.line_number())?;
        let upper_bound = self.eval(upper)?.as_float(upper.line_number())?;

        let saved = Rc::clone(&self.scope);
        self.scope = Scope::child(&saved);

        let outcome = self.run_for(variable, lower_bound, upper_bound, body, line);
        self.scope = saved;

        outcome
    }

    fn run_for(&mut self,
               variable: &str,
               lower: f64,
               upper: f64,
               body: &Statement,
               line: usize)
               -> EvalResult<Option<Signal>> {
        Scope::declare(&self.scope, variable, Type::Float, Value::float(lower), false, line)?;

        let mut iteration = lower;

        while iteration <= upper {
            Scope::set(&self.scope, variable, Value::float(iteration), line)?;

            match self.exec(body)? {
                Some(Signal::Break { .. }) => return Ok(None),
                Some(signal @ Signal::Return { .. }) => return Ok(Some(signal)),
                None => {},
            }

            iteration += 1.0;
        }

        Ok(None)
    }

    /// Declares a function.
    ///
    /// The function value captures the scope chain active right here, which
    /// is what makes it a closure over its declaration site. The binding
    /// itself is created in that same scope, so a recursive body can resolve
    /// its own name through the captured chain.
    fn exec_function(&mut self, declaration: &FunctionDecl) -> EvalResult<Option<Signal>> {
        let parameter_types = declaration.parameters
                                         .iter()
                                         .map(|parameter| parameter.ty.clone())
                                         .collect();
        let callable = Callable::Declared { declaration: Rc::new(declaration.clone()),
                                            closure: Rc::clone(&self.scope) };
        let value = Value::function(callable, declaration.return_type.clone(), parameter_types);
        let ty = value.ty.clone();

        Scope::declare(&self.scope,
                       &declaration.name,
                       ty,
                       value,
                       false,
                       declaration.line)?;
        Ok(None)
    }
}
